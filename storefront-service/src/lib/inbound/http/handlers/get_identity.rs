use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::IdentityResponseData;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::ports::AuthServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_identity(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<IdentityResponseData>, ApiError> {
    let identity_id = IdentityId::from_string(&id).map_err(IdentityError::from)?;
    user.ensure_self_or_owner(&identity_id)?;

    state
        .auth_service
        .get_identity(&identity_id)
        .await
        .map_err(ApiError::from)
        .map(|ref identity| ApiSuccess::new(StatusCode::OK, identity.into()))
}
