use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tower_cookies::{cookie::time::Duration, Cookie, Cookies};
use uuid::Uuid;

use crate::error::Result;
use crate::middleware_layer::auth::SESSION_COOKIE;
use crate::services::auth as auth_service;
use crate::state::AppState;

/// The request payload for user login.
#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// The response payload for authentication-related requests.
#[derive(Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
}

/// Session cookie: HttpOnly, bounded by the same inactivity window the
/// server-side session expires under.
fn session_cookie(value: String, max_age_minutes: i64) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, value);
    cookie.set_http_only(true);
    cookie.set_same_site(tower_cookies::cookie::SameSite::Lax);
    cookie.set_max_age(Duration::minutes(max_age_minutes));
    cookie.set_path("/");
    cookie
}

/// Handles user login.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<Response> {
    tracing::info!("🔐 Login attempt - {}", payload.username);

    let session_id =
        auth_service::authenticate(&state, &payload.username, &payload.password).await?;

    cookies.add(session_cookie(
        session_id.to_string(),
        state.config.session_ttl_minutes,
    ));
    tracing::info!("✅ Session cookie added: session_id={}", session_id);

    let response = AuthResponse {
        success: true,
        message: "Login successful".to_string(),
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Handles user logout. The route is auth-gated, but the teardown itself is
/// unconditional: whatever id the cookie names gets invalidated and the
/// cookie is cleared either way.
#[axum::debug_handler]
pub async fn logout(State(state): State<AppState>, cookies: Cookies) -> Result<Response> {
    if let Some(session_id) = cookies
        .get(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
    {
        auth_service::deauthenticate(&state, session_id).await;
    }

    let mut expired = Cookie::new(SESSION_COOKIE, "");
    expired.set_max_age(Duration::seconds(0));
    expired.set_path("/");
    cookies.remove(expired);

    tracing::info!("✅ User logged out");

    let response = AuthResponse {
        success: true,
        message: "Logout successful".to_string(),
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}
