use auth::Role;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Echo the claims the access guard attached to this request.
pub async fn me(Extension(user): Extension<AuthenticatedUser>) -> ApiSuccess<MeResponseData> {
    ApiSuccess::new(StatusCode::OK, MeResponseData::from(&user))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl From<&AuthenticatedUser> for MeResponseData {
    fn from(user: &AuthenticatedUser) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.claims.email.clone(),
            name: user.claims.name.clone(),
            role: user.claims.role,
            issued_at: user.claims.iat,
            expires_at: user.claims.exp,
        }
    }
}
