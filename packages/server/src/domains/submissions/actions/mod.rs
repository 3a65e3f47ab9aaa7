pub mod queries;
pub mod review;
pub mod submit;

pub use queries::{get_submission, list_submissions};
pub use review::{approve_submission, reject_submission, review_submission, ReviewResult};
pub use submit::{confirmation_message, submit_submission};
