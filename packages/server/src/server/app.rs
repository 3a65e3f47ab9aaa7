//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains::auth::{AdminCredentials, JwtService};
use crate::kernel::{RateLimiter, ServerDeps};
use crate::server::middleware::{extract_client_ip, jwt_auth_middleware, require_admin};
use crate::server::routes::{
    approve_submission_handler, create_submission_handler, get_resource_handler,
    get_submission_handler, health_handler, list_resources_handler,
    list_submissions_handler, list_tags_handler, login_handler, reject_submission_handler,
    review_submission_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub db_pool: PgPool,
    pub server_deps: Arc<ServerDeps>,
}

impl AxumAppState {
    pub fn new(server_deps: ServerDeps) -> Self {
        Self {
            db_pool: server_deps.db_pool.clone(),
            server_deps: Arc::new(server_deps),
        }
    }

    /// Wire up services from configuration
    pub fn from_config(pool: PgPool, config: &Config) -> Self {
        let jwt_service = Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone()));
        let admin_credentials = Arc::new(AdminCredentials::new(&config.admin_password));
        let submission_limiter = Arc::new(RateLimiter::new(
            config.submission_rate_limit,
            chrono::Duration::seconds(config.submission_rate_window_secs),
        ));

        Self::new(ServerDeps::new(
            pool,
            jwt_service,
            admin_credentials,
            submission_limiter,
        ))
    }
}

/// Build the API router with request-scoped middleware (client IP, auth).
///
/// Transport concerns (CORS, tracing, the global IP limiter) are added by
/// [`build_app`].
pub fn build_router(state: AxumAppState) -> Router {
    let jwt_service = state.server_deps.jwt_service.clone();
    let admin_credentials = state.server_deps.admin_credentials.clone();

    // Everything but login requires an admin
    let admin = Router::new()
        .route("/submissions", get(list_submissions_handler))
        .route(
            "/submissions/:id",
            get(get_submission_handler).patch(review_submission_handler),
        )
        .route("/submissions/:id/approve", post(approve_submission_handler))
        .route("/submissions/:id/reject", post(reject_submission_handler))
        .route_layer(middleware::from_fn(require_admin))
        .route("/login", post(login_handler));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/resources", get(list_resources_handler))
        .route("/api/resources/:id", get(get_resource_handler))
        .route("/api/tags", get(list_tags_handler))
        .route("/api/submissions", post(create_submission_handler))
        .nest("/api/admin", admin)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), admin_credentials.clone(), req, next)
        }))
        .layer(middleware::from_fn(extract_client_ip))
        .layer(Extension(state))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        // Credentials (the session cookie) only with an explicit origin list
        cors.allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true)
    }
}

/// Build the full application: API router plus CORS, tracing and the
/// global per-IP request limiter.
pub fn build_app(state: AxumAppState, allowed_origins: &[String]) -> Result<Router> {
    // Global backstop: 10 requests/sec per IP with bursts of 20
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .use_headers() // Extract IP from X-Forwarded-For header
            .finish()
            .context("Invalid rate limiter configuration")?,
    );

    let rate_limit_layer = GovernorLayer {
        config: rate_limit_config,
    };

    Ok(build_router(state)
        .layer(rate_limit_layer)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http()))
}
