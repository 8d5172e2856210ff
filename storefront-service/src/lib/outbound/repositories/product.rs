use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::domain::identity::models::IdentityId;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Category;
use crate::domain::product::models::Price;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductFilter;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductName;
use crate::domain::product::models::SortOrder;
use crate::domain::product::ports::ProductRepository;

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    price: f64,
    category: String,
    description: Option<String>,
    image_url: Option<String>,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = ProductError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product {
            id: ProductId(row.id),
            name: ProductName::new(row.name)?,
            price: Price::new(row.price)?,
            category: Category::new(row.category)?,
            description: row.description,
            image_url: row.image_url,
            owner_id: IdentityId(row.owner_id),
            created_at: row.created_at,
        })
    }
}

fn database_error(err: sqlx::Error) -> ProductError {
    ProductError::DatabaseError(err.to_string())
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ProductError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, category, description, image_url, owner_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(product.id.0)
        .bind(product.name.as_str())
        .bind(product.price.value())
        .bind(product.category.as_str())
        .bind(product.description.as_deref())
        .bind(product.image_url.as_deref())
        .bind(product.owner_id.0)
        .bind(product.created_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(product)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, price, category, description, image_url, owner_id, created_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Product::try_from).transpose()
    }

    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, ProductError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, name, price, category, description, image_url, owner_id, created_at \
             FROM products",
        );

        if let Some(category) = &filter.category {
            query.push(" WHERE category = ").push_bind(category.clone());
        }

        match filter.sort {
            Some(SortOrder::Asc) => query.push(" ORDER BY price ASC"),
            Some(SortOrder::Desc) => query.push(" ORDER BY price DESC"),
            None => query.push(" ORDER BY created_at ASC"),
        };

        let rows = query
            .build_query_as::<ProductRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn update(&self, product: Product) -> Result<Product, ProductError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, price = $3, category = $4, description = $5, image_url = $6
            WHERE id = $1
            "#,
        )
        .bind(product.id.0)
        .bind(product.name.as_str())
        .bind(product.price.value())
        .bind(product.category.as_str())
        .bind(product.description.as_deref())
        .bind(product.image_url.as_deref())
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(product.id.to_string()));
        }

        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> Result<(), ProductError> {
        let result = sqlx::query(
            r#"
            DELETE FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
