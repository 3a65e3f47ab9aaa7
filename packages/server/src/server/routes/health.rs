//! Liveness probe for load balancers and uptime checks

use std::time::{Duration, Instant};

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AxumAppState;

/// Budget for the database round trip
const DB_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: DatabaseCheck,
    pool: PoolStats,
}

#[derive(Serialize)]
pub struct DatabaseCheck {
    ok: bool,
    latency_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
pub struct PoolStats {
    size: u32,
    idle: usize,
    max: u32,
}

async fn check_database(state: &AxumAppState) -> DatabaseCheck {
    let started = Instant::now();
    let result = tokio::time::timeout(
        DB_CHECK_TIMEOUT,
        sqlx::query("SELECT 1").execute(&state.db_pool),
    )
    .await;

    let error = match result {
        Ok(Ok(_)) => None,
        Ok(Err(e)) => Some(format!("Query failed: {}", e)),
        Err(_) => Some(format!("Query timed out after {}s", DB_CHECK_TIMEOUT.as_secs())),
    };

    DatabaseCheck {
        ok: error.is_none(),
        latency_ms: started.elapsed().as_millis(),
        error,
    }
}

/// GET /health
///
/// 200 when the database answers `SELECT 1`, 503 otherwise.
pub async fn health_handler(
    Extension(state): Extension<AxumAppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let database = check_database(&state).await;
    if let Some(error) = &database.error {
        tracing::warn!(error = %error, "Health check failed");
    }

    let pool = PoolStats {
        size: state.db_pool.size(),
        idle: state.db_pool.num_idle(),
        max: state.db_pool.options().get_max_connections(),
    };

    let (code, status) = if database.ok {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        code,
        Json(HealthResponse {
            status,
            database,
            pool,
        }),
    )
}
