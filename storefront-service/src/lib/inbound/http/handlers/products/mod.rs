use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::product::models::Product;

pub mod create_product;
pub mod delete_product;
pub mod get_product;
pub mod list_products;
pub mod update_product;

pub use create_product::create_product;
pub use delete_product::delete_product;
pub use get_product::get_product;
pub use list_products::list_products;
pub use update_product::update_product;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductResponseData {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Product> for ProductResponseData {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.as_str().to_string(),
            price: product.price.value(),
            category: product.category.as_str().to_string(),
            description: product.description.clone(),
            image_url: product.image_url.clone(),
            owner_id: product.owner_id.to_string(),
            created_at: product.created_at,
        }
    }
}
