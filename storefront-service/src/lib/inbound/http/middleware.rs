use std::collections::HashSet;
use std::sync::Arc;

use auth::Authenticator;
use auth::Claims;
use auth::Role;
use axum::extract::Request;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::headers::HeaderMapExt;
use thiserror::Error;

use crate::domain::identity::models::IdentityId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Cookie carrying the access token.
pub const AUTH_COOKIE: &str = "jwt";

/// Request gate failures. Every token problem collapses into `Unauthenticated`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GuardError {
    #[error("Please login to continue")]
    Unauthenticated,

    #[error("Forbidden resource")]
    Forbidden,
}

impl From<GuardError> for ApiError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::Unauthenticated => ApiError::Unauthorized(err.to_string()),
            GuardError::Forbidden => ApiError::Forbidden(err.to_string()),
        }
    }
}

/// Verified claims attached to the request by [`access_guard`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: IdentityId,
    pub claims: Claims,
}

impl AuthenticatedUser {
    pub fn role(&self) -> Role {
        self.claims.role
    }

    /// Identity endpoints are open to the identity itself and to owners.
    pub fn ensure_self_or_owner(&self, target: &IdentityId) -> Result<(), GuardError> {
        if self.id == *target || self.role() == Role::Owner {
            Ok(())
        } else {
            Err(GuardError::Forbidden)
        }
    }
}

/// Locate the access token: the `jwt` cookie first, then `Authorization: Bearer`.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(AUTH_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|authorization| authorization.token().to_string())
}

/// Resolve the caller from request headers.
pub fn authenticate(
    headers: &HeaderMap,
    authenticator: &Authenticator,
) -> Result<AuthenticatedUser, GuardError> {
    let token = extract_token(headers).ok_or_else(|| {
        tracing::debug!("No access token on request");
        GuardError::Unauthenticated
    })?;

    let claims = authenticator.validate_token(&token).map_err(|e| {
        tracing::warn!(reason = %e, "Access token rejected");
        GuardError::Unauthenticated
    })?;

    let id = IdentityId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "Access token subject is not an identity id");
        GuardError::Unauthenticated
    })?;

    Ok(AuthenticatedUser { id, claims })
}

/// Rejects requests without a valid token and attaches [`AuthenticatedUser`] otherwise.
pub async fn access_guard(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate(req.headers(), &state.authenticator)?;
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Role set a route demands. An empty set admits any authenticated caller.
#[derive(Debug, Clone, Default)]
pub struct RequiredRoles {
    roles: Arc<HashSet<Role>>,
}

impl RequiredRoles {
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            roles: Arc::new(roles.into_iter().collect()),
        }
    }

    pub fn permits(&self, role: Role) -> bool {
        self.roles.is_empty() || self.roles.contains(&role)
    }
}

/// Runs after [`access_guard`]; rejects callers whose role claim is outside the required set.
pub async fn role_guard(
    State(required): State<RequiredRoles>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or(GuardError::Unauthenticated)?;

    if !required.permits(user.role()) {
        tracing::warn!(identity_id = %user.id, role = %user.role(), "Role not permitted");
        return Err(GuardError::Forbidden.into());
    }

    Ok(next.run(req).await)
}
