use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::identity::models::LoginCommand;
use crate::domain::identity::ports::AuthServicePort;
use crate::inbound::http::middleware::AUTH_COOKIE;
use crate::inbound::http::router::AppState;
use crate::inbound::http::router::CookieSettings;

/// Verify credentials, set the `jwt` cookie and echo the token in the body.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError> {
    let email = body.email.clone();

    let token = state
        .auth_service
        .login(LoginCommand {
            email: body.email,
            password: body.password,
        })
        .await
        .map_err(ApiError::from)?;

    let jar = jar.add(access_cookie(token.access_token.clone(), &state.cookie));

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            LoginResponseData {
                message: "Login successful".to_string(),
                user: LoginUserData { email },
                access_token: token.access_token,
            },
        ),
    ))
}

fn access_cookie(token: String, settings: &CookieSettings) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .http_only(true)
        .secure(settings.secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::seconds(settings.max_age_seconds))
        .build()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub message: String,
    pub user: LoginUserData,
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginUserData {
    pub email: String,
}
