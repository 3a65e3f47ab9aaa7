//! Public intake: rate limit, validate, store as pending.

use tracing::{info, warn};

use crate::domains::submissions::data::{SubmissionInput, SubmissionType, ValidationErrors};
use crate::domains::submissions::errors::SubmissionError;
use crate::domains::submissions::models::Submission;
use crate::kernel::ServerDeps;

/// Confirmation shown to the submitter
pub fn confirmation_message(submission_type: SubmissionType) -> &'static str {
    match submission_type {
        SubmissionType::New => "Your resource suggestion has been submitted for review.",
        SubmissionType::Edit => "Your update suggestion has been submitted for review.",
    }
}

/// Accept a public submission from `client_ip`.
///
/// The quota is charged first, so malformed and invalid bodies count against
/// it too. A body that is not JSON is `InvalidJson`; JSON that is not an
/// object of the expected shape is reported as a form error.
pub async fn submit_submission(
    body: &[u8],
    client_ip: &str,
    deps: &ServerDeps,
) -> Result<Submission, SubmissionError> {
    if !deps.submission_limiter.check(client_ip).await {
        warn!(client_ip = %client_ip, "Submission rate limit exceeded");
        return Err(SubmissionError::RateLimited);
    }

    let payload: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| SubmissionError::InvalidJson)?;

    let input: SubmissionInput = serde_json::from_value(payload)
        .map_err(|e| ValidationErrors::form(format!("Malformed submission: {e}")))?;

    let valid = input.validate().map_err(|errors| {
        info!(
            client_ip = %client_ip,
            fields = ?errors.field_errors.keys().collect::<Vec<_>>(),
            "Submission failed validation"
        );
        errors
    })?;

    let submission = Submission::create(&valid, &deps.db_pool).await?;

    info!(
        submission_id = %submission.id,
        submission_type = %valid.submission_type,
        resource_type = %valid.resource_type,
        tag_count = valid.tags.len(),
        "Submission received"
    );

    Ok(submission)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_differ_by_type() {
        assert_ne!(
            confirmation_message(SubmissionType::New),
            confirmation_message(SubmissionType::Edit)
        );
        assert!(confirmation_message(SubmissionType::Edit).contains("update"));
    }
}
