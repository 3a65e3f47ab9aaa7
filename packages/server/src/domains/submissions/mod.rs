//! Submissions domain - public intake and the moderation queue
//!
//! A submission is created `pending` by the public form and is later approved
//! (which materializes a catalog resource for `new` submissions) or rejected
//! by an admin.

pub mod actions;
pub mod data;
pub mod errors;
pub mod machines;
pub mod models;

pub use actions::{
    approve_submission, confirmation_message, get_submission, list_submissions,
    reject_submission, review_submission, submit_submission, ReviewResult,
};
pub use data::{
    ReviewDecision, ReviewInput, ReviewNotesInput, SubmissionInput, SubmissionStatus,
    SubmissionType, ValidationErrors,
};
pub use errors::SubmissionError;
pub use machines::{decide, ReviewOutcome};
pub use models::Submission;
