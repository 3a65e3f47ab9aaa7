//! Auth domain actions

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::common::AuthError;
use crate::domains::auth::credentials::ADMIN_SUBJECT;
use crate::domains::auth::jwt::TOKEN_TTL_HOURS;
use crate::kernel::ServerDeps;

/// Result of a successful admin login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Exchange the shared admin password for a session token.
pub async fn login(password: &str, deps: &ServerDeps) -> Result<LoginResult, AuthError> {
    if !deps.admin_credentials.verify(password) {
        warn!("Admin login failed: invalid password");
        return Err(AuthError::InvalidPassword);
    }

    let token = deps.jwt_service.create_token(ADMIN_SUBJECT, true)?;
    let expires_at = Utc::now() + Duration::hours(TOKEN_TTL_HOURS);

    info!(subject = ADMIN_SUBJECT, "Admin logged in");

    Ok(LoginResult { token, expires_at })
}
