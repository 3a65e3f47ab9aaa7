use thiserror::Error;

use super::data::{SubmissionStatus, ValidationErrors};
use crate::common::AuthError;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Too many submissions. Please try again later.")]
    RateLimited,

    #[error("Invalid JSON in request body")]
    InvalidJson,

    #[error("Invalid submission data")]
    Validation(ValidationErrors),

    #[error("Invalid submission ID")]
    InvalidId,

    #[error("Submission not found")]
    NotFound,

    #[error("Submission is already {current} and cannot be {requested}")]
    Conflict {
        current: SubmissionStatus,
        requested: SubmissionStatus,
    },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationErrors> for SubmissionError {
    fn from(errors: ValidationErrors) -> Self {
        SubmissionError::Validation(errors)
    }
}

impl From<sqlx::Error> for SubmissionError {
    fn from(err: sqlx::Error) -> Self {
        SubmissionError::Internal(err.into())
    }
}
