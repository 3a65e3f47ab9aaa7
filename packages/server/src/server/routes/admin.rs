//! Moderation queue endpoints. Mounted behind the admin guard.

use axum::{
    body::Bytes,
    extract::{Extension, Path, Query},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::common::{AppState, SubmissionId};
use crate::domains::resources::Resource;
use crate::domains::submissions::data::{
    parse_status_filter, validate_admin_notes, ReviewInput, ReviewNotesInput,
};
use crate::domains::submissions::{
    approve_submission, get_submission, list_submissions, reject_submission, review_submission,
    ReviewResult, Submission, SubmissionError,
};
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;
use crate::server::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct SubmissionListQuery {
    pub status: Option<String>,
}

#[derive(Serialize)]
pub struct SubmissionListResponse {
    success: bool,
    data: Vec<Submission>,
    count: usize,
}

#[derive(Serialize)]
pub struct SubmissionResponse {
    success: bool,
    data: Submission,
}

#[derive(Serialize)]
pub struct ReviewResponse {
    success: bool,
    message: String,
    data: Submission,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource: Option<Resource>,
}

impl ReviewResponse {
    fn from_result(result: ReviewResult) -> Self {
        let status = result.submission.status.clone();
        let message = if result.changed {
            format!("Submission {status}")
        } else {
            format!("Submission was already {status}")
        };

        Self {
            success: true,
            message,
            data: result.submission,
            resource: result.resource,
        }
    }
}

fn visitor(auth_user: Option<Extension<AuthUser>>) -> AppState {
    match auth_user {
        Some(Extension(user)) => AppState::authenticated(user.subject, user.is_admin),
        None => AppState::anonymous(),
    }
}

fn parse_id(raw: &str) -> Result<SubmissionId, ApiError> {
    SubmissionId::parse(raw).map_err(|_| SubmissionError::InvalidId.into())
}

/// Parse an optional JSON body; an empty body yields the default value
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|_| ApiError::BadRequest("Invalid JSON in request body".to_string()))
}

/// GET /api/admin/submissions?status=
pub async fn list_submissions_handler(
    Extension(state): Extension<AxumAppState>,
    auth_user: Option<Extension<AuthUser>>,
    Query(query): Query<SubmissionListQuery>,
) -> Result<Json<SubmissionListResponse>, ApiError> {
    let status = parse_status_filter(query.status.as_deref())
        .map_err(|details| ApiError::validation("Invalid status filter", details))?;

    let submissions = list_submissions(status, &visitor(auth_user), &state.server_deps).await?;

    Ok(Json(SubmissionListResponse {
        success: true,
        count: submissions.len(),
        data: submissions,
    }))
}

/// GET /api/admin/submissions/:id
pub async fn get_submission_handler(
    Extension(state): Extension<AxumAppState>,
    auth_user: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let id = parse_id(&id)?;
    let submission = get_submission(id, &visitor(auth_user), &state.server_deps).await?;

    Ok(Json(SubmissionResponse {
        success: true,
        data: submission,
    }))
}

/// PATCH /api/admin/submissions/:id
pub async fn review_submission_handler(
    Extension(state): Extension<AxumAppState>,
    auth_user: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<ReviewResponse>, ApiError> {
    let id = parse_id(&id)?;
    let input: ReviewInput = parse_body(&body)?;
    let review = input
        .validate()
        .map_err(|details| ApiError::validation("Invalid review data", details))?;

    let result = review_submission(id, review, &visitor(auth_user), &state.server_deps).await?;
    Ok(Json(ReviewResponse::from_result(result)))
}

/// POST /api/admin/submissions/:id/approve
pub async fn approve_submission_handler(
    Extension(state): Extension<AxumAppState>,
    auth_user: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<ReviewResponse>, ApiError> {
    let id = parse_id(&id)?;
    let input: ReviewNotesInput = parse_body(&body)?;
    let notes = validate_admin_notes(input.admin_notes.as_deref())
        .map_err(|details| ApiError::validation("Invalid review data", details))?;

    let result = approve_submission(id, notes, &visitor(auth_user), &state.server_deps).await?;
    Ok(Json(ReviewResponse::from_result(result)))
}

/// POST /api/admin/submissions/:id/reject
pub async fn reject_submission_handler(
    Extension(state): Extension<AxumAppState>,
    auth_user: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<ReviewResponse>, ApiError> {
    let id = parse_id(&id)?;
    let input: ReviewNotesInput = parse_body(&body)?;
    let notes = validate_admin_notes(input.admin_notes.as_deref())
        .map_err(|details| ApiError::validation("Invalid review data", details))?;

    let result = reject_submission(id, notes, &visitor(auth_user), &state.server_deps).await?;
    Ok(Json(ReviewResponse::from_result(result)))
}
