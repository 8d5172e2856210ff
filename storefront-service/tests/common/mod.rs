#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use auth::JwtSettings;
use auth::PasswordHasher;
use chrono::Duration;
use serde_json::json;
use serde_json::Value;
use storefront_service::domain::identity::models::DisplayName;
use storefront_service::domain::identity::models::EmailAddress;
use storefront_service::domain::identity::ports::AuthServicePort;
use storefront_service::domain::identity::service::AuthService;
use storefront_service::domain::product::service::ProductService;
use storefront_service::inbound::http::router::create_router;
use storefront_service::inbound::http::router::CookieSettings;
use storefront_service::outbound::repositories::InMemoryIdentityRepository;
use storefront_service::outbound::repositories::InMemoryProductRepository;

pub const JWT_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const STRONG_PASSWORD: &str = "Strong1!";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
    pub identities: Arc<InMemoryIdentityRepository>,
    pub auth_service: Arc<AuthService<InMemoryIdentityRepository>>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let jwt_settings = JwtSettings::new(JWT_SECRET, Duration::hours(1));
        let authenticator = Arc::new(Authenticator::new(
            PasswordHasher::with_work_factor(1).expect("Failed to build password hasher"),
            &jwt_settings,
        ));

        let identities = Arc::new(InMemoryIdentityRepository::new());
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&identities),
            Arc::clone(&authenticator),
        ));
        let product_service = Arc::new(ProductService::new(Arc::new(
            InMemoryProductRepository::new(),
        )));

        let router = create_router(
            auth_service.clone(),
            product_service,
            authenticator,
            CookieSettings {
                secure: false,
                max_age_seconds: 3600,
            },
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: Self::client(),
            jwt_handler: JwtHandler::new(&jwt_settings),
            identities,
            auth_service,
        }
    }

    /// Fresh client with its own cookie store
    pub fn client() -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create reqwest client")
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make GET request with Bearer token and no cookies
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        reqwest::Client::new().get(self.url(path)).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token and no cookies
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        reqwest::Client::new().post(self.url(path)).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token and no cookies
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        reqwest::Client::new().patch(self.url(path)).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token and no cookies
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        reqwest::Client::new().delete(self.url(path)).bearer_auth(token)
    }

    /// Register through the API and return the response body
    pub async fn register(&self, email: &str, name: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/register")
            .json(&json!({
                "email": email,
                "name": name,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in through the API and return the access token
    pub async fn login_token(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string()
    }

    /// Register a guest and return its access token
    pub async fn guest_token(&self, email: &str) -> String {
        let response = self.register(email, "Guest", STRONG_PASSWORD).await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        self.login_token(email, STRONG_PASSWORD).await
    }

    /// Provision an owner out-of-band and return its access token
    pub async fn owner_token(&self, email: &str) -> String {
        self.auth_service
            .provision_owner(
                EmailAddress::new(email.to_string()).unwrap(),
                DisplayName::new("Owner".to_string()).unwrap(),
                STRONG_PASSWORD.to_string(),
            )
            .await
            .expect("Failed to provision owner");
        self.login_token(email, STRONG_PASSWORD).await
    }
}
