use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::DisplayName;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::UpdateIdentityCommand;
use crate::domain::identity::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::IdentityResponseData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating an identity (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateIdentityRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

impl UpdateIdentityRequest {
    fn try_into_command(self) -> Result<UpdateIdentityCommand, IdentityError> {
        let email = self.email.map(EmailAddress::new).transpose()?;
        let display_name = self.name.map(DisplayName::new).transpose()?;

        Ok(UpdateIdentityCommand {
            email,
            display_name,
            password: self.password,
        })
    }
}

pub async fn update_identity(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateIdentityRequest>,
) -> Result<ApiSuccess<IdentityResponseData>, ApiError> {
    let identity_id = IdentityId::from_string(&id).map_err(IdentityError::from)?;
    user.ensure_self_or_owner(&identity_id)?;
    let command = req.try_into_command()?;

    state
        .auth_service
        .update_identity(&identity_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref identity| ApiSuccess::new(StatusCode::OK, identity.into()))
}
