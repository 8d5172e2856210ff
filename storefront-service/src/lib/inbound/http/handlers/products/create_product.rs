use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ProductResponseData;
use crate::domain::product::errors::ProductValidationError;
use crate::domain::product::models::Category;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Price;
use crate::domain::product::models::ProductName;
use crate::domain::product::ports::ProductServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Create a product owned by the caller. Routed behind the owner role guard.
pub async fn create_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<CreateProductRequest>,
) -> Result<ApiSuccess<ProductResponseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .product_service
        .create_product(command, user.id)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::CREATED, product.into()))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateProductRequest {
    name: String,
    price: f64,
    category: String,
    description: Option<String>,
    image_url: Option<String>,
}

impl CreateProductRequest {
    fn try_into_command(self) -> Result<CreateProductCommand, ProductValidationError> {
        Ok(CreateProductCommand {
            name: ProductName::new(self.name)?,
            price: Price::new(self.price)?,
            category: Category::new(self.category)?,
            description: self.description,
            image_url: self.image_url,
        })
    }
}

impl From<ProductValidationError> for ApiError {
    fn from(err: ProductValidationError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
