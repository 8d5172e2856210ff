use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use axum_extra::extract::CookieJar;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AUTH_COOKIE;
use crate::inbound::http::router::AppState;

/// Expire the `jwt` cookie. Issued tokens stay valid until their own expiry.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, ApiSuccess<LogoutResponseData>) {
    let removal = Cookie::build((AUTH_COOKIE, ""))
        .http_only(true)
        .secure(state.cookie.secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();

    (
        jar.add(removal),
        ApiSuccess::new(
            StatusCode::OK,
            LogoutResponseData {
                message: "Logout successful".to_string(),
            },
        ),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}
