//! Test fixtures for creating test data.
//!
//! Payloads mirror what the public form posts. Names carry a random suffix so
//! concurrent tests sharing one database never see each other's rows.

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::Response;
use directory_core::domains::submissions::{Submission, SubmissionInput};
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

/// A short random token for unique names
pub fn unique(prefix: &str) -> String {
    format!("{} {}", prefix, &Uuid::new_v4().simple().to_string()[..8])
}

/// Form payload for a new meetup submission
pub fn new_resource_payload(name: &str) -> Value {
    json!({
        "submissionType": "new",
        "resourceType": "meetup",
        "submitterName": "Ada Lovelace",
        "submitterEmail": "Ada@Example.com",
        "name": name,
        "website": "https://meetup.example.org/rust",
        "description": "Monthly talks for Rust programmers",
        "tags": "Rust,  Systems Programming , rust",
    })
}

/// Form payload for a new conference submission with dates and an image
pub fn new_conference_payload(name: &str) -> Value {
    json!({
        "resourceType": "conference",
        "submitterName": "Grace Hopper",
        "submitterEmail": "grace@example.com",
        "name": name,
        "website": "https://conf.example.org",
        "description": "Two days of talks",
        "image": "https://conf.example.org/logo.png",
        "conferenceDate": "2026-11-14",
        "cfpDate": "2026-09-01",
        "tags": ["Cloud", "AI"],
    })
}

/// Form payload for an edit request against an existing resource
pub fn edit_request_payload(existing_name: &str) -> Value {
    json!({
        "submissionType": "edit",
        "resourceType": "meetup",
        "submitterName": "Linus",
        "submitterEmail": "linus@example.com",
        "existingResourceName": existing_name,
        "updateReason": "The meetup moved to a new venue",
    })
}

/// Validate and insert a submission straight through the model
pub async fn create_submission(pool: &PgPool, payload: Value) -> Result<Submission> {
    let input: SubmissionInput = serde_json::from_value(payload)?;
    let valid = input
        .validate()
        .map_err(|errors| anyhow::anyhow!("invalid fixture: {:?}", errors))?;
    Submission::create(&valid, pool).await
}

/// Read a response body as JSON
pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}
