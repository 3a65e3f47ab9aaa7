use crate::domains::auth::{parse_basic_auth, AdminCredentials, JwtService};
use axum::{
    http::{
        header::{AUTHORIZATION, COOKIE},
        HeaderMap,
    },
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Cookie carrying the admin session token
pub const ADMIN_TOKEN_COOKIE: &str = "admin_token";

/// Authenticated user information
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub subject: String,
    pub is_admin: bool,
}

/// Authentication middleware
///
/// Accepts a Bearer token, Basic credentials checked against the admin
/// password, or the admin session cookie, and adds AuthUser to request
/// extensions. If nothing valid is presented the request continues without
/// AuthUser (public access).
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    admin_credentials: Arc<AdminCredentials>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_user = extract_auth_user(request.headers(), &jwt_service, &admin_credentials);

    if let Some(user) = auth_user {
        debug!(subject = %user.subject, is_admin = user.is_admin, "Authenticated request");
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid credentials");
    }

    next.run(request).await
}

/// Extract and verify credentials from request headers
fn extract_auth_user(
    headers: &HeaderMap,
    jwt_service: &JwtService,
    admin_credentials: &AdminCredentials,
) -> Option<AuthUser> {
    let from_header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|auth_str| {
            if let Some(basic) = parse_basic_auth(auth_str) {
                return admin_credentials.verify(&basic.password).then(|| AuthUser {
                    subject: basic.username,
                    is_admin: true,
                });
            }

            // Handle both "Bearer <token>" and raw token
            let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);
            user_from_token(token, jwt_service)
        });

    from_header.or_else(|| {
        cookie_value(headers, ADMIN_TOKEN_COOKIE)
            .and_then(|token| user_from_token(&token, jwt_service))
    })
}

fn user_from_token(token: &str, jwt_service: &JwtService) -> Option<AuthUser> {
    let claims = jwt_service.verify_token(token.trim()).ok()?;
    Some(AuthUser {
        subject: claims.sub,
        is_admin: claims.is_admin,
    })
}

/// Find a cookie by name in the Cookie header(s)
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}
