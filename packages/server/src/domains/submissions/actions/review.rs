//! Admin moderation: approve or reject a pending submission.
//!
//! Every review locks the submission row for the length of its transaction,
//! so two admins acting on the same submission are serialized and the state
//! machine sees the committed status.

use tracing::{info, warn};

use crate::common::{AppState, SubmissionId};
use crate::domains::resources::models::Resource;
use crate::domains::submissions::data::{
    ReviewDecision, SubmissionStatus, SubmissionType, ValidReview,
};
use crate::domains::submissions::errors::SubmissionError;
use crate::domains::submissions::machines::{decide, ReviewOutcome};
use crate::domains::submissions::models::Submission;
use crate::kernel::ServerDeps;

/// Outcome of a review request
#[derive(Debug, Clone)]
pub struct ReviewResult {
    pub submission: Submission,
    /// Resource created or linked by an approval
    pub resource: Option<Resource>,
    /// False when the submission already carried the requested decision
    pub changed: bool,
}

pub async fn approve_submission(
    id: SubmissionId,
    admin_notes: Option<String>,
    state: &AppState,
    deps: &ServerDeps,
) -> Result<ReviewResult, SubmissionError> {
    review_submission(
        id,
        ValidReview {
            decision: ReviewDecision::Approve,
            admin_notes,
        },
        state,
        deps,
    )
    .await
}

pub async fn reject_submission(
    id: SubmissionId,
    admin_notes: Option<String>,
    state: &AppState,
    deps: &ServerDeps,
) -> Result<ReviewResult, SubmissionError> {
    review_submission(
        id,
        ValidReview {
            decision: ReviewDecision::Reject,
            admin_notes,
        },
        state,
        deps,
    )
    .await
}

/// Apply an admin decision to a submission (admin only)
pub async fn review_submission(
    id: SubmissionId,
    review: ValidReview,
    state: &AppState,
    deps: &ServerDeps,
) -> Result<ReviewResult, SubmissionError> {
    let reviewer = state.require_admin()?.to_string();

    let mut tx = deps.db_pool.begin().await?;

    let submission = Submission::lock_for_update(id, &mut *tx)
        .await?
        .ok_or(SubmissionError::NotFound)?;
    let current = submission.parsed_status()?;

    match decide(current, review.decision) {
        ReviewOutcome::Conflict { current, requested } => {
            warn!(
                submission_id = %id,
                current = %current,
                requested = %requested,
                "Conflicting review decision"
            );
            Err(SubmissionError::Conflict { current, requested })
        }

        ReviewOutcome::AlreadyInState(status) => {
            tx.commit().await?;

            let resource = match submission.resource_id {
                Some(resource_id) => {
                    Resource::find_by_id_optional(resource_id, &deps.db_pool).await?
                }
                None => None,
            };

            info!(
                submission_id = %id,
                resource_id = ?submission.resource_id,
                status = %status,
                "Submission already reviewed, nothing to change"
            );

            Ok(ReviewResult {
                submission,
                resource,
                changed: false,
            })
        }

        ReviewOutcome::Approve => {
            let resource = match submission.parsed_type()? {
                SubmissionType::New => Some(
                    Resource::create_from_submission(&submission, &submission.tag_names(), &mut *tx)
                        .await?,
                ),
                SubmissionType::Edit => match submission.existing_resource_name.as_deref() {
                    Some(name) => Resource::find_by_name_insensitive(name, &mut *tx).await?,
                    None => None,
                },
            };

            let resource_id = resource.as_ref().map(|r| r.id);
            let submission = Submission::mark_reviewed(
                id,
                SubmissionStatus::Approved,
                review.admin_notes.as_deref(),
                &reviewer,
                resource_id,
                &mut *tx,
            )
            .await?;

            tx.commit().await?;

            info!(
                submission_id = %id,
                resource_id = ?resource_id,
                submission_type = %submission.submission_type,
                reviewed_by = %reviewer,
                "Submission approved"
            );

            Ok(ReviewResult {
                submission,
                resource,
                changed: true,
            })
        }

        ReviewOutcome::Reject => {
            let submission = Submission::mark_reviewed(
                id,
                SubmissionStatus::Rejected,
                review.admin_notes.as_deref(),
                &reviewer,
                None,
                &mut *tx,
            )
            .await?;

            tx.commit().await?;

            info!(
                submission_id = %id,
                reviewed_by = %reviewer,
                "Submission rejected"
            );

            Ok(ReviewResult {
                submission,
                resource: None,
                changed: true,
            })
        }
    }
}
