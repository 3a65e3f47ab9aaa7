//! Resource model - public catalog entries
//!
//! Resources are what visitors browse: meetups, conferences, online
//! resources and tech hubs. They are either seeded or materialized from an
//! approved submission, in which case `source_submission_id` points back at
//! it and is unique.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{OffsetPagination, ResourceId, SubmissionId};
use crate::domains::resources::models::ResourceTag;
use crate::domains::submissions::models::Submission;

/// Image used when an approved submission did not provide one
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Kind of catalog entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceType {
    Meetup,
    Conference,
    Online,
    TechHub,
}

impl ResourceType {
    pub const ALL: [ResourceType; 4] = [
        ResourceType::Meetup,
        ResourceType::Conference,
        ResourceType::Online,
        ResourceType::TechHub,
    ];
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceType::Meetup => write!(f, "meetup"),
            ResourceType::Conference => write!(f, "conference"),
            ResourceType::Online => write!(f, "online"),
            ResourceType::TechHub => write!(f, "tech-hub"),
        }
    }
}

impl std::str::FromStr for ResourceType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "meetup" => Ok(ResourceType::Meetup),
            "conference" => Ok(ResourceType::Conference),
            "online" => Ok(ResourceType::Online),
            "tech-hub" => Ok(ResourceType::TechHub),
            _ => Err(anyhow::anyhow!("Invalid resource type: {}", s)),
        }
    }
}

/// Resource - a public catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Resource {
    pub id: ResourceId,
    #[serde(rename = "type")]
    pub resource_type: String,

    // Core content
    pub name: String,
    pub description: String,
    pub link: String,
    pub image: Option<String>,

    // Conference-only dates
    pub conference_date: Option<NaiveDate>,
    pub cfp_date: Option<NaiveDate>,

    // Provenance
    pub source_submission_id: Option<SubmissionId>,

    // Timestamps
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for inserting a resource
#[derive(Debug, Clone)]
pub struct NewResource {
    pub resource_type: ResourceType,
    pub name: String,
    pub description: String,
    pub link: String,
    pub image: Option<String>,
    pub conference_date: Option<NaiveDate>,
    pub cfp_date: Option<NaiveDate>,
    pub source_submission_id: Option<SubmissionId>,
}

/// Public catalog filter
#[derive(Debug, Clone, Default)]
pub struct ResourceFilter {
    pub resource_type: Option<ResourceType>,
    /// Case-insensitive substring matched against name and description
    pub search: Option<String>,
}

impl ResourceFilter {
    /// ILIKE pattern for the search term, with LIKE metacharacters escaped
    fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                let escaped = s
                    .replace('\\', "\\\\")
                    .replace('%', "\\%")
                    .replace('_', "\\_");
                format!("%{}%", escaped)
            })
    }
}

impl Resource {
    /// Find resource by ID (optional)
    pub async fn find_by_id_optional(id: ResourceId, pool: &PgPool) -> Result<Option<Self>> {
        let resource = sqlx::query_as::<_, Self>("SELECT * FROM resources WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(resource)
    }

    /// Find a resource by name, ignoring case and surrounding whitespace
    pub async fn find_by_name_insensitive(
        name: &str,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>> {
        let resource = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM resources
            WHERE LOWER(name) = LOWER($1)
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(name.trim())
        .fetch_optional(&mut *conn)
        .await?;
        Ok(resource)
    }

    /// One page of the public catalog, ordered by name, plus the total count
    pub async fn find_page(
        filter: &ResourceFilter,
        page: &OffsetPagination,
        pool: &PgPool,
    ) -> Result<(Vec<Self>, i64)> {
        let resource_type = filter.resource_type.map(|t| t.to_string());
        let pattern = filter.search_pattern();

        let resources = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM resources
            WHERE ($1::text IS NULL OR resource_type = $1)
              AND ($2::text IS NULL OR name ILIKE $2 OR description ILIKE $2)
            ORDER BY name ASC, id ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(&resource_type)
        .bind(&pattern)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM resources
            WHERE ($1::text IS NULL OR resource_type = $1)
              AND ($2::text IS NULL OR name ILIKE $2 OR description ILIKE $2)
            "#,
        )
        .bind(&resource_type)
        .bind(&pattern)
        .fetch_one(pool)
        .await?;

        Ok((resources, total))
    }

    /// Insert a resource.
    ///
    /// When `source_submission_id` is set and a resource already exists for
    /// that submission, the existing row is returned unchanged.
    pub async fn create(new: NewResource, conn: &mut PgConnection) -> Result<Self> {
        let resource = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO resources (
                id, resource_type, name, description, link, image,
                conference_date, cfp_date, source_submission_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (source_submission_id) DO UPDATE
            SET source_submission_id = resources.source_submission_id
            RETURNING *
            "#,
        )
        .bind(ResourceId::new())
        .bind(new.resource_type.to_string())
        .bind(new.name)
        .bind(new.description)
        .bind(new.link)
        .bind(new.image)
        .bind(new.conference_date)
        .bind(new.cfp_date)
        .bind(new.source_submission_id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(resource)
    }

    /// Materialize an approved `new` submission, then link its tags in order.
    ///
    /// Safe to call twice for the same submission: the second call returns the
    /// resource created by the first and the tag links are left as they were.
    pub async fn create_from_submission(
        submission: &Submission,
        tags: &[String],
        conn: &mut PgConnection,
    ) -> Result<Self> {
        let (Some(name), Some(link), Some(description)) = (
            submission.name.clone(),
            submission.website.clone(),
            submission.description.clone(),
        ) else {
            anyhow::bail!(
                "Submission {} is missing name, website or description",
                submission.id
            );
        };

        let resource = Self::create(
            NewResource {
                resource_type: submission.resource_type.parse()?,
                name,
                description,
                link,
                image: Some(
                    submission
                        .image
                        .clone()
                        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
                ),
                conference_date: submission.conference_date,
                cfp_date: submission.cfp_date,
                source_submission_id: Some(submission.id),
            },
            conn,
        )
        .await?;

        ResourceTag::attach_names(resource.id, tags, conn).await?;

        Ok(resource)
    }

    /// Count every resource (used by the seeder to skip populated databases)
    pub async fn count_all(pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM resources")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_type_string_roundtrip() {
        for kind in ResourceType::ALL {
            assert_eq!(kind.to_string().parse::<ResourceType>().unwrap(), kind);
        }
        assert!("workshop".parse::<ResourceType>().is_err());
    }

    #[test]
    fn resource_type_serde_is_kebab_case() {
        let json = serde_json::to_string(&ResourceType::TechHub).unwrap();
        assert_eq!(json, "\"tech-hub\"");
    }

    #[test]
    fn search_pattern_escapes_like_metacharacters() {
        let filter = ResourceFilter {
            resource_type: None,
            search: Some(" 100%_rust ".to_string()),
        };
        assert_eq!(filter.search_pattern().unwrap(), "%100\\%\\_rust%");
    }

    #[test]
    fn blank_search_is_ignored() {
        let filter = ResourceFilter {
            resource_type: None,
            search: Some("   ".to_string()),
        };
        assert!(filter.search_pattern().is_none());
    }
}
