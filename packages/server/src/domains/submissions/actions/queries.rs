//! Admin views of the moderation queue

use tracing::debug;

use crate::common::{AppState, SubmissionId};
use crate::domains::submissions::data::SubmissionStatus;
use crate::domains::submissions::errors::SubmissionError;
use crate::domains::submissions::models::Submission;
use crate::kernel::ServerDeps;

/// Submissions in one status, newest first (admin only)
pub async fn list_submissions(
    status: SubmissionStatus,
    state: &AppState,
    deps: &ServerDeps,
) -> Result<Vec<Submission>, SubmissionError> {
    state.require_admin()?;

    let submissions = Submission::find_by_status(status, &deps.db_pool).await?;
    debug!(status = %status, count = submissions.len(), "Listed submissions");
    Ok(submissions)
}

/// A single submission (admin only)
pub async fn get_submission(
    id: SubmissionId,
    state: &AppState,
    deps: &ServerDeps,
) -> Result<Submission, SubmissionError> {
    state.require_admin()?;

    Submission::find_by_id_optional(id, &deps.db_pool)
        .await?
        .ok_or(SubmissionError::NotFound)
}
