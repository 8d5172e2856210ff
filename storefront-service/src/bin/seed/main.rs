use std::sync::Arc;

use auth::Authenticator;
use auth::JwtSettings;
use auth::PasswordHasher;
use sqlx::postgres::PgPoolOptions;
use storefront_service::config::Config;
use storefront_service::domain::identity::errors::IdentityError;
use storefront_service::domain::identity::models::DisplayName;
use storefront_service::domain::identity::models::EmailAddress;
use storefront_service::domain::identity::models::IdentityId;
use storefront_service::domain::identity::ports::AuthServicePort;
use storefront_service::domain::identity::ports::IdentityRepository;
use storefront_service::domain::identity::service::AuthService;
use storefront_service::domain::product::models::Category;
use storefront_service::domain::product::models::CreateProductCommand;
use storefront_service::domain::product::models::Price;
use storefront_service::domain::product::models::ProductFilter;
use storefront_service::domain::product::models::ProductName;
use storefront_service::domain::product::ports::ProductServicePort;
use storefront_service::domain::product::service::ProductService;
use storefront_service::outbound::repositories::PostgresIdentityRepository;
use storefront_service::outbound::repositories::PostgresProductRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const SAMPLE_PRODUCTS: &[(&str, f64, &str)] = &[
    ("Wireless Headphones", 99.99, "Electronics"),
    ("Coffee Mug", 15.50, "Home"),
    ("Running Shoes", 129.99, "Sports"),
    ("Laptop Stand", 45.00, "Office"),
    ("Plant Pot", 12.99, "Home"),
];

/// Provision the configured owner and a starter catalog.
#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_seed=info,storefront_service=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    sqlx::migrate!("./migrations").run(&pg_pool).await?;

    let authenticator = Arc::new(Authenticator::new(
        PasswordHasher::with_work_factor(config.password.work_factor)?,
        &JwtSettings::new(
            config.jwt.secret.clone(),
            chrono::Duration::seconds(config.jwt.expiration_seconds),
        ),
    ));
    let identity_repository = Arc::new(PostgresIdentityRepository::new(pg_pool.clone()));
    let auth_service = AuthService::new(Arc::clone(&identity_repository), authenticator);
    let product_service = ProductService::new(Arc::new(PostgresProductRepository::new(pg_pool)));

    let owner_email = EmailAddress::new(config.seed.owner_email.clone())?;
    let owner_id = match auth_service
        .provision_owner(
            owner_email.clone(),
            DisplayName::new(config.seed.owner_name.clone())?,
            config.seed.owner_password.clone(),
        )
        .await
    {
        Ok(owner) => {
            tracing::info!(identity_id = %owner.id, email = %owner.email, "Owner provisioned");
            owner.id
        }
        Err(IdentityError::DuplicateEmail) => existing_owner(&identity_repository, &owner_email).await?,
        Err(e) => return Err(e.into()),
    };

    let existing = product_service.list_products(ProductFilter::default()).await?;
    if !existing.is_empty() {
        tracing::info!(count = existing.len(), "Catalog already populated, skipping products");
        return Ok(());
    }

    for (name, price, category) in SAMPLE_PRODUCTS {
        let product = product_service
            .create_product(
                CreateProductCommand {
                    name: ProductName::new(name.to_string())?,
                    price: Price::new(*price)?,
                    category: Category::new(category.to_string())?,
                    description: None,
                    image_url: None,
                },
                owner_id,
            )
            .await?;
        tracing::info!(product_id = %product.id, name = %name, "Sample product added");
    }

    Ok(())
}

async fn existing_owner(
    repository: &PostgresIdentityRepository,
    email: &EmailAddress,
) -> Result<IdentityId, anyhow::Error> {
    let identity = repository
        .find_by_email(email.as_str())
        .await?
        .ok_or_else(|| anyhow::anyhow!("Owner {} vanished after a duplicate email", email))?;

    tracing::info!(identity_id = %identity.id, "Owner already provisioned");
    Ok(identity.id)
}
