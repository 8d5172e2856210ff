use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::identity::models::IdentityId;
use crate::domain::product::errors::ProductError;
use crate::domain::product::errors::ProductValidationError;

/// Catalog entry owned by the identity that created it.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub price: Price,
    pub category: Category,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub owner_id: IdentityId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, ProductError> {
        Uuid::parse_str(s)
            .map(ProductId)
            .map_err(|e| ProductError::InvalidProductId(e.to_string()))
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductName(String);

impl ProductName {
    pub fn new(name: String) -> Result<Self, ProductValidationError> {
        if name.trim().is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category(String);

impl Category {
    pub fn new(category: String) -> Result<Self, ProductValidationError> {
        if category.trim().is_empty() {
            return Err(ProductValidationError::EmptyCategory);
        }
        Ok(Self(category))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Non-negative, finite price.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> Result<Self, ProductValidationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ProductValidationError::InvalidPrice(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Price ordering for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("Unknown sort order: {}", other)),
        }
    }
}

/// Listing filter. Both fields are optional; without `sort` the storage order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub sort: Option<SortOrder>,
}

#[derive(Debug)]
pub struct CreateProductCommand {
    pub name: ProductName,
    pub price: Price,
    pub category: Category,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Partial update; only provided fields change. Ownership never changes.
#[derive(Debug, Default)]
pub struct UpdateProductCommand {
    pub name: Option<ProductName>,
    pub price: Option<Price>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}
