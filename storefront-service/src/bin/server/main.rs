use std::sync::Arc;

use auth::Authenticator;
use auth::JwtSettings;
use auth::PasswordHasher;
use sqlx::postgres::PgPoolOptions;
use storefront_service::config::Config;
use storefront_service::domain::identity::service::AuthService;
use storefront_service::domain::product::service::ProductService;
use storefront_service::inbound::http::router::create_router;
use storefront_service::inbound::http::router::CookieSettings;
use storefront_service::outbound::repositories::PostgresIdentityRepository;
use storefront_service::outbound::repositories::PostgresProductRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "storefront-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_expiration_seconds = config.jwt.expiration_seconds,
        password_work_factor = config.password.work_factor,
        cookie_secure = config.cookie.secure,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        PasswordHasher::with_work_factor(config.password.work_factor)?,
        &JwtSettings::new(
            config.jwt.secret.clone(),
            chrono::Duration::seconds(config.jwt.expiration_seconds),
        ),
    ));
    let identity_repository = Arc::new(PostgresIdentityRepository::new(pg_pool.clone()));
    let product_repository = Arc::new(PostgresProductRepository::new(pg_pool));

    let auth_service = Arc::new(AuthService::new(
        identity_repository,
        Arc::clone(&authenticator),
    ));
    let product_service = Arc::new(ProductService::new(product_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        auth_service,
        product_service,
        authenticator,
        CookieSettings {
            secure: config.cookie.secure,
            max_age_seconds: config.jwt.expiration_seconds,
        },
    );

    match axum::serve(http_listener, http_application).await {
        Ok(()) => tracing::info!("Server exited successfully"),
        Err(e) => tracing::error!(error = %e, "Server error"),
    };

    Ok(())
}
