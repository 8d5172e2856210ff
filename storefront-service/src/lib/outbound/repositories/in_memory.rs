use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::models::SafeIdentityView;
use crate::domain::identity::ports::IdentityRepository;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductFilter;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::SortOrder;
use crate::domain::product::ports::ProductRepository;

/// Identity storage held in process memory.
///
/// Email uniqueness is checked and applied under a single write lock, so
/// racing inserts for the same email produce exactly one identity.
#[derive(Default)]
pub struct InMemoryIdentityRepository {
    identities: RwLock<HashMap<IdentityId, Identity>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored identities holding `email`.
    pub async fn count_by_email(&self, email: &str) -> usize {
        self.identities
            .read()
            .await
            .values()
            .filter(|identity| identity.email.as_str() == email)
            .count()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<SafeIdentityView>, IdentityError> {
        Ok(self
            .identities
            .read()
            .await
            .values()
            .find(|identity| identity.email.as_str() == email)
            .map(Identity::to_safe_view))
    }

    async fn find_by_email_with_secret(
        &self,
        email: &str,
    ) -> Result<Option<Identity>, IdentityError> {
        Ok(self
            .identities
            .read()
            .await
            .values()
            .find(|identity| identity.email.as_str() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError> {
        Ok(self.identities.read().await.get(id).cloned())
    }

    async fn insert(&self, identity: NewIdentity) -> Result<Identity, IdentityError> {
        let mut identities = self.identities.write().await;

        if identities
            .values()
            .any(|existing| existing.email == identity.email)
        {
            return Err(IdentityError::DuplicateEmail);
        }

        let now = Utc::now();
        let stored = Identity {
            id: identity.id,
            email: identity.email,
            display_name: identity.display_name,
            password_hash: identity.password_hash,
            role: identity.role,
            created_at: now,
            updated_at: now,
        };
        identities.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn update(&self, mut identity: Identity) -> Result<Identity, IdentityError> {
        let mut identities = self.identities.write().await;

        if !identities.contains_key(&identity.id) {
            return Err(IdentityError::NotFound(identity.id.to_string()));
        }

        if identities
            .values()
            .any(|existing| existing.id != identity.id && existing.email == identity.email)
        {
            return Err(IdentityError::DuplicateEmail);
        }

        identity.updated_at = Utc::now();
        identities.insert(identity.id, identity.clone());

        Ok(identity)
    }

    async fn delete(&self, id: &IdentityId) -> Result<(), IdentityError> {
        match self.identities.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(IdentityError::NotFound(id.to_string())),
        }
    }
}

/// Product storage held in process memory, kept in insertion order.
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ProductError> {
        self.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        Ok(self
            .products
            .read()
            .await
            .iter()
            .find(|product| product.id == *id)
            .cloned())
    }

    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, ProductError> {
        let mut products: Vec<Product> = self
            .products
            .read()
            .await
            .iter()
            .filter(|product| match &filter.category {
                Some(category) => product.category.as_str() == category,
                None => true,
            })
            .cloned()
            .collect();

        match filter.sort {
            Some(SortOrder::Asc) => {
                products.sort_by(|a, b| a.price.value().total_cmp(&b.price.value()))
            }
            Some(SortOrder::Desc) => {
                products.sort_by(|a, b| b.price.value().total_cmp(&a.price.value()))
            }
            None => {}
        }

        Ok(products)
    }

    async fn update(&self, product: Product) -> Result<Product, ProductError> {
        let mut products = self.products.write().await;

        let slot = products
            .iter_mut()
            .find(|existing| existing.id == product.id)
            .ok_or_else(|| ProductError::NotFound(product.id.to_string()))?;
        *slot = product.clone();

        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> Result<(), ProductError> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|product| product.id != *id);

        if products.len() == before {
            return Err(ProductError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use auth::Role;

    use super::*;
    use crate::domain::identity::models::DisplayName;
    use crate::domain::identity::models::EmailAddress;
    use crate::domain::product::models::Category;
    use crate::domain::product::models::Price;
    use crate::domain::product::models::ProductName;

    fn new_identity(email: &str) -> NewIdentity {
        NewIdentity {
            id: IdentityId::new(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            display_name: DisplayName::new("U".to_string()).unwrap(),
            password_hash: "$argon2id$hash".to_string(),
            role: Role::Guest,
        }
    }

    fn product(name: &str, price: f64, category: &str) -> Product {
        Product {
            id: ProductId::new(),
            name: ProductName::new(name.to_string()).unwrap(),
            price: Price::new(price).unwrap(),
            category: Category::new(category.to_string()).unwrap(),
            description: None,
            image_url: None,
            owner_id: IdentityId::new(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_email() {
        let repository = InMemoryIdentityRepository::new();

        repository.insert(new_identity("dup@x.com")).await.unwrap();
        let result = repository.insert(new_identity("dup@x.com")).await;

        assert!(matches!(result, Err(IdentityError::DuplicateEmail)));
        assert_eq!(repository.count_by_email("dup@x.com").await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_store_one_identity() {
        let repository = Arc::new(InMemoryIdentityRepository::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repository = Arc::clone(&repository);
                tokio::spawn(async move { repository.insert(new_identity("race@x.com")).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(repository.count_by_email("race@x.com").await, 1);
    }

    #[tokio::test]
    async fn test_update_rejects_email_of_another_identity() {
        let repository = InMemoryIdentityRepository::new();
        repository.insert(new_identity("a@x.com")).await.unwrap();
        let mut second = repository.insert(new_identity("b@x.com")).await.unwrap();

        second.email = EmailAddress::new("a@x.com".to_string()).unwrap();
        let result = repository.update(second).await;

        assert!(matches!(result, Err(IdentityError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_find_by_email_is_exact() {
        let repository = InMemoryIdentityRepository::new();
        repository.insert(new_identity("Case@x.com")).await.unwrap();

        assert!(repository.find_by_email("Case@x.com").await.unwrap().is_some());
        assert!(repository.find_by_email("case@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters_and_sorts() {
        let repository = InMemoryProductRepository::new();
        repository.create(product("Lamp", 40.0, "home")).await.unwrap();
        repository.create(product("Mug", 8.5, "home")).await.unwrap();
        repository.create(product("Cap", 15.0, "apparel")).await.unwrap();

        let filter = ProductFilter {
            category: Some("home".to_string()),
            sort: Some(SortOrder::Asc),
        };
        let names: Vec<_> = repository
            .list(&filter)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name.as_str().to_string())
            .collect();
        assert_eq!(names, vec!["Mug", "Lamp"]);

        let filter = ProductFilter {
            category: None,
            sort: Some(SortOrder::Desc),
        };
        let prices: Vec<_> = repository
            .list(&filter)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.price.value())
            .collect();
        assert_eq!(prices, vec![40.0, 15.0, 8.5]);
    }

    #[tokio::test]
    async fn test_delete_missing_product() {
        let repository = InMemoryProductRepository::new();
        let result = repository.delete(&ProductId::new()).await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }
}
