use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{ResourceId, SubmissionId};
use crate::domains::submissions::data::{SubmissionStatus, SubmissionType, ValidSubmission};
use crate::domains::tag::normalize::{parse_stored_tags, to_json};

/// Submission - a public suggestion awaiting moderation
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Submission {
    pub id: SubmissionId,
    pub submission_type: String, // 'new', 'edit'
    pub resource_type: String,
    pub submitter_name: String,
    pub submitter_email: String,
    pub status: String, // 'pending', 'approved', 'rejected'

    // New resource fields
    pub name: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub conference_date: Option<NaiveDate>,
    pub cfp_date: Option<NaiveDate>,
    pub tags: Option<String>, // normalized JSON array text

    // Edit request fields
    pub existing_resource_name: Option<String>,
    pub update_reason: Option<String>,

    // Review outcome
    pub admin_notes: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<String>,
    pub resource_id: Option<ResourceId>,

    pub created_at: DateTime<Utc>,
}

impl Submission {
    pub fn parsed_status(&self) -> Result<SubmissionStatus> {
        self.status.parse()
    }

    pub fn parsed_type(&self) -> Result<SubmissionType> {
        self.submission_type.parse()
    }

    /// Normalized tag names stored on the submission
    pub fn tag_names(&self) -> Vec<String> {
        parse_stored_tags(self.tags.as_deref())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub async fn find_by_id_optional(id: SubmissionId, pool: &PgPool) -> Result<Option<Self>> {
        let submission = sqlx::query_as::<_, Self>("SELECT * FROM submissions WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(submission)
    }

    /// Submissions with the given status, newest first
    pub async fn find_by_status(status: SubmissionStatus, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM submissions
            WHERE status = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(status.to_string())
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Lock a submission row for the rest of the caller's transaction
    pub async fn lock_for_update(
        id: SubmissionId,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>> {
        let submission = sqlx::query_as::<_, Self>(
            "SELECT * FROM submissions WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(submission)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Insert a validated submission as pending
    pub async fn create(valid: &ValidSubmission, pool: &PgPool) -> Result<Self> {
        let tags = (!valid.tags.is_empty()).then(|| to_json(&valid.tags));

        let submission = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO submissions (
                id, submission_type, resource_type, submitter_name, submitter_email, status,
                name, website, description, image, conference_date, cfp_date, tags,
                existing_resource_name, update_reason
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(SubmissionId::new())
        .bind(valid.submission_type.to_string())
        .bind(valid.resource_type.to_string())
        .bind(&valid.submitter_name)
        .bind(&valid.submitter_email)
        .bind(SubmissionStatus::Pending.to_string())
        .bind(&valid.name)
        .bind(&valid.website)
        .bind(&valid.description)
        .bind(&valid.image)
        .bind(valid.conference_date)
        .bind(valid.cfp_date)
        .bind(tags)
        .bind(&valid.existing_resource_name)
        .bind(&valid.update_reason)
        .fetch_one(pool)
        .await?;
        Ok(submission)
    }

    /// Record a review decision
    pub async fn mark_reviewed(
        id: SubmissionId,
        status: SubmissionStatus,
        admin_notes: Option<&str>,
        reviewed_by: &str,
        resource_id: Option<ResourceId>,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        let submission = sqlx::query_as::<_, Self>(
            r#"
            UPDATE submissions
            SET status = $2,
                admin_notes = $3,
                reviewed_at = NOW(),
                reviewed_by = $4,
                resource_id = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.to_string())
        .bind(admin_notes)
        .bind(reviewed_by)
        .bind(resource_id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(submission)
    }
}
