use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ProductResponseData;
use crate::domain::product::errors::ProductValidationError;
use crate::domain::product::models::Category;
use crate::domain::product::models::Price;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductName;
use crate::domain::product::models::UpdateProductCommand;
use crate::domain::product::ports::ProductServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl UpdateProductRequest {
    fn try_into_command(self) -> Result<UpdateProductCommand, ProductValidationError> {
        Ok(UpdateProductCommand {
            name: self.name.map(ProductName::new).transpose()?,
            price: self.price.map(Price::new).transpose()?,
            category: self.category.map(Category::new).transpose()?,
            description: self.description,
            image_url: self.image_url,
        })
    }
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<ApiSuccess<ProductResponseData>, ApiError> {
    let product_id = ProductId::from_string(&id)?;
    let command = req.try_into_command()?;

    state
        .product_service
        .update_product(&product_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::OK, product.into()))
}
