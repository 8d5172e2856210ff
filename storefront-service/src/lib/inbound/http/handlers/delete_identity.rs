use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_identity(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let identity_id = IdentityId::from_string(&id).map_err(IdentityError::from)?;
    user.ensure_self_or_owner(&identity_id)?;

    state
        .auth_service
        .delete_identity(&identity_id)
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}
