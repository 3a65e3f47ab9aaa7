//! Moderation state machine.
//!
//! Pure decision logic: given where a submission is and what the admin asked
//! for, say what should happen. The review actions do the IO.

use super::data::{ReviewDecision, SubmissionStatus};

/// What a review request should do to a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// pending -> approved, materializing the resource for new submissions
    Approve,
    /// pending -> rejected
    Reject,
    /// The submission already carries this decision; nothing to write
    AlreadyInState(SubmissionStatus),
    /// The submission was already decided the other way
    Conflict {
        current: SubmissionStatus,
        requested: SubmissionStatus,
    },
}

pub fn decide(current: SubmissionStatus, decision: ReviewDecision) -> ReviewOutcome {
    let requested = decision.target_status();
    match (current, decision) {
        (SubmissionStatus::Pending, ReviewDecision::Approve) => ReviewOutcome::Approve,
        (SubmissionStatus::Pending, ReviewDecision::Reject) => ReviewOutcome::Reject,
        (current, _) if current == requested => ReviewOutcome::AlreadyInState(current),
        (current, _) => ReviewOutcome::Conflict { current, requested },
    }
}
