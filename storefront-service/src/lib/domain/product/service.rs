use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::identity::models::IdentityId;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductFilter;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::UpdateProductCommand;
use crate::domain::product::ports::ProductRepository;
use crate::domain::product::ports::ProductServicePort;

/// Catalog service over an injected product repository.
pub struct ProductService<PR>
where
    PR: ProductRepository,
{
    repository: Arc<PR>,
}

impl<PR> ProductService<PR>
where
    PR: ProductRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> ProductServicePort for ProductService<PR>
where
    PR: ProductRepository,
{
    async fn create_product(
        &self,
        command: CreateProductCommand,
        owner_id: IdentityId,
    ) -> Result<Product, ProductError> {
        let product = Product {
            id: ProductId::new(),
            name: command.name,
            price: command.price,
            category: command.category,
            description: command.description,
            image_url: command.image_url,
            owner_id,
            created_at: Utc::now(),
        };

        let created = self.repository.create(product).await?;
        tracing::info!(product_id = %created.id, owner_id = %created.owner_id, "Product created");

        Ok(created)
    }

    async fn list_products(&self, filter: ProductFilter) -> Result<Vec<Product>, ProductError> {
        self.repository.list(&filter).await
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id.to_string()))
    }

    async fn update_product(
        &self,
        id: &ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError> {
        let mut product = self.get_product(id).await?;

        if let Some(name) = command.name {
            product.name = name;
        }
        if let Some(price) = command.price {
            product.price = price;
        }
        if let Some(category) = command.category {
            product.category = category;
        }
        if let Some(description) = command.description {
            product.description = Some(description);
        }
        if let Some(image_url) = command.image_url {
            product.image_url = Some(image_url);
        }

        let updated = self.repository.update(product).await?;
        tracing::info!(product_id = %updated.id, "Product updated");

        Ok(updated)
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), ProductError> {
        self.repository.delete(id).await?;
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }
}
