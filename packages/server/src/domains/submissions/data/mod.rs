pub mod input;
pub mod types;

pub use input::{
    parse_status_filter, validate_admin_notes, FormText, ReviewInput, ReviewNotesInput,
    SubmissionInput, TagsInput, ValidReview, ValidSubmission, ValidationErrors,
};
pub use types::{ReviewDecision, SubmissionStatus, SubmissionType};
