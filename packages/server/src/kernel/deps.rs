//! Server dependencies shared by routes and domain actions.

use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::auth::{AdminCredentials, JwtService};
use crate::kernel::rate_limit::RateLimiter;

/// Dependency container handed to every action.
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// Issues and verifies admin session tokens
    pub jwt_service: Arc<JwtService>,
    /// Shared admin password (stored as a digest)
    pub admin_credentials: Arc<AdminCredentials>,
    /// Per-IP quota for public submissions
    pub submission_limiter: Arc<RateLimiter>,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        jwt_service: Arc<JwtService>,
        admin_credentials: Arc<AdminCredentials>,
        submission_limiter: Arc<RateLimiter>,
    ) -> Self {
        Self {
            db_pool,
            jwt_service,
            admin_credentials,
            submission_limiter,
        }
    }
}
