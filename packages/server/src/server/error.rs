//! HTTP error mapping.
//!
//! Every failed API call answers with `{success: false, error, details?}`.

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::common::AuthError;
use crate::domains::submissions::{SubmissionError, ValidationErrors};

/// Challenge sent with every 401 from the admin area
pub const ADMIN_REALM: &str = r#"Basic realm="Admin Panel", charset="UTF-8""#;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{message}")]
    Validation {
        message: String,
        details: ValidationErrors,
    },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid password")]
    InvalidCredentials,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Too many submissions. Please try again later.")]
    RateLimited,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<ValidationErrors>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Validation failure with a caller-chosen headline
    pub fn validation(message: impl Into<String>, details: ValidationErrors) -> Self {
        ApiError::Validation {
            message: message.into(),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let ApiError::Internal(err) = &self {
            tracing::error!(error = %err, "Request failed");
        }

        let error = self.to_string();
        let (details, challenge) = match self {
            ApiError::Validation { details, .. } => (Some(details), false),
            ApiError::Unauthorized => (None, true),
            _ => (None, false),
        };

        let mut response = (
            status,
            Json(ErrorBody {
                success: false,
                error,
                details,
            }),
        )
            .into_response();

        if challenge {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static(ADMIN_REALM));
        }

        response
    }
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::RateLimited => ApiError::RateLimited,
            SubmissionError::Validation(details) => {
                ApiError::validation("Invalid submission data", details)
            }
            SubmissionError::InvalidJson | SubmissionError::InvalidId => {
                ApiError::BadRequest(err.to_string())
            }
            SubmissionError::NotFound => ApiError::NotFound(err.to_string()),
            SubmissionError::Conflict { .. } => ApiError::Conflict(err.to_string()),
            SubmissionError::Auth(auth) => auth.into(),
            SubmissionError::Internal(e) => ApiError::Internal(e),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationRequired
            | AuthError::AdminRequired
            | AuthError::InvalidToken => ApiError::Unauthorized,
            AuthError::InvalidPassword => ApiError::InvalidCredentials,
            AuthError::InternalError(e) => ApiError::Internal(e),
        }
    }
}
