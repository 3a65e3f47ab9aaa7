//! Admin login

use axum::{
    body::Bytes,
    extract::Extension,
    http::{header::SET_COOKIE, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domains::auth::login;
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;
use crate::server::middleware::ADMIN_TOKEN_COOKIE;

/// Browser session cookie lifetime
pub const SESSION_COOKIE_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    success: bool,
    token: String,
    expires_at: DateTime<Utc>,
}

pub fn session_cookie(token: &str) -> String {
    format!(
        "{ADMIN_TOKEN_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_COOKIE_MAX_AGE_SECS}"
    )
}

/// POST /api/admin/login
pub async fn login_handler(
    Extension(state): Extension<AxumAppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: LoginRequest = serde_json::from_slice(&body)
        .map_err(|_| ApiError::BadRequest("Invalid JSON in request body".to_string()))?;

    let password = request
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Password is required".to_string()))?;

    let result = login(&password, &state.server_deps).await?;

    let cookie = HeaderValue::from_str(&session_cookie(&result.token))
        .map_err(|e| ApiError::Internal(e.into()))?;

    Ok((
        [(SET_COOKIE, cookie)],
        Json(LoginResponse {
            success: true,
            token: result.token,
            expires_at: result.expires_at,
        }),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_is_http_only_and_lax() {
        let cookie = session_cookie("abc");
        assert!(cookie.starts_with("admin_token=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=604800"));
    }
}
