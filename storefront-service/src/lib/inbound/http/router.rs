use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::Role;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::delete_identity::delete_identity;
use super::handlers::get_identity::get_identity;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::me::me;
use super::handlers::products::create_product;
use super::handlers::products::delete_product;
use super::handlers::products::get_product;
use super::handlers::products::list_products;
use super::handlers::products::update_product;
use super::handlers::register::register;
use super::handlers::update_identity::update_identity;
use super::middleware::access_guard;
use super::middleware::role_guard;
use super::middleware::RequiredRoles;
use crate::domain::identity::ports::AuthServicePort;
use crate::domain::product::ports::ProductServicePort;

/// Attributes of the `jwt` cookie set on login.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub secure: bool,
    pub max_age_seconds: i64,
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub product_service: Arc<dyn ProductServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub cookie: CookieSettings,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    product_service: Arc<dyn ProductServicePort>,
    authenticator: Arc<Authenticator>,
    cookie: CookieSettings,
) -> Router {
    let state = AppState {
        auth_service,
        product_service,
        authenticator,
        cookie,
    };

    let public_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout));

    let owner_only = middleware::from_fn_with_state(RequiredRoles::new([Role::Owner]), role_guard);

    let protected_routes = Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/users/:id", get(get_identity))
        .route("/api/users/:id", patch(update_identity))
        .route("/api/users/:id", delete(delete_identity))
        .route("/api/products", get(list_products))
        .route(
            "/api/products",
            post(create_product).route_layer(owner_only.clone()),
        )
        .route("/api/products/:id", get(get_product))
        .route(
            "/api/products/:id",
            patch(update_product).route_layer(owner_only.clone()),
        )
        .route(
            "/api/products/:id",
            delete(delete_product).route_layer(owner_only),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), access_guard));

    // Headers are left off the span: they carry tokens and cookies
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
