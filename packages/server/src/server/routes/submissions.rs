//! Public submission intake

use axum::{
    body::Bytes,
    extract::Extension,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::common::SubmissionId;
use crate::domains::submissions::{confirmation_message, submit_submission};
use crate::kernel::RateLimitStatus;
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;
use crate::server::middleware::ClientIp;

/// Identifier used when no client address can be determined
pub const UNKNOWN_CLIENT: &str = "unknown";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionCreatedResponse {
    success: bool,
    message: String,
    submission_id: SubmissionId,
}

pub fn rate_limit_headers(status: &RateLimitStatus) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in status.headers() {
        if let Ok(value) = HeaderValue::from_str(&value) {
            headers.insert(HeaderName::from_static(name), value);
        }
    }
    headers
}

/// POST /api/submissions
///
/// Every answer carries the caller's quota, including 400s for bodies that
/// are not JSON.
pub async fn create_submission_handler(
    Extension(state): Extension<AxumAppState>,
    client_ip: Option<Extension<ClientIp>>,
    body: Bytes,
) -> Response {
    let client_ip = client_ip
        .map(|Extension(ip)| ip.to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string());
    let deps = &state.server_deps;

    let result = submit_submission(&body, &client_ip, deps)
        .await
        .map_err(ApiError::from);

    let headers = rate_limit_headers(&deps.submission_limiter.status(&client_ip).await);

    match result {
        Ok(submission) => {
            let submission_type = submission.parsed_type().unwrap_or_default();
            (
                StatusCode::CREATED,
                headers,
                Json(SubmissionCreatedResponse {
                    success: true,
                    message: confirmation_message(submission_type).to_string(),
                    submission_id: submission.id,
                }),
            )
                .into_response()
        }
        Err(err) => (headers, err).into_response(),
    }
}
