use thiserror::Error;

/// Error for product field validation failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductValidationError {
    #[error("Product name must not be empty")]
    EmptyName,

    #[error("Category must not be empty")]
    EmptyCategory,

    #[error("Price must be a non-negative number, got {0}")]
    InvalidPrice(f64),
}

/// Top-level error for catalog operations
#[derive(Debug, Clone, Error)]
pub enum ProductError {
    #[error("Invalid product: {0}")]
    Invalid(#[from] ProductValidationError),

    #[error("Invalid product ID: {0}")]
    InvalidProductId(String),

    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
