use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::jwt_auth::AuthUser;
use crate::server::error::ApiError;

/// Reject requests without an authenticated admin with a Basic challenge
pub async fn require_admin(request: Request, next: Next) -> Response {
    let is_admin = request
        .extensions()
        .get::<AuthUser>()
        .is_some_and(|user| user.is_admin);

    if !is_admin {
        debug!(path = %request.uri().path(), "Admin access denied");
        return ApiError::Unauthorized.into_response();
    }

    next.run(request).await
}
