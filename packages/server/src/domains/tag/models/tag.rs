use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::TagId;
use crate::domains::tag::normalize::normalize_tag;

/// A normalized tag shared across resources
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: TagId,
    pub name: String, // always normalized: trimmed, single-spaced, lowercase
    pub created_at: DateTime<Utc>,
}

/// Tag with the number of resources carrying it (for public filters)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TagUsage {
    pub name: String,
    pub count: i64,
}

impl Tag {
    /// Upsert a tag by name inside the caller's transaction
    pub async fn find_or_create(name: &str, conn: &mut PgConnection) -> Result<Self> {
        let name = normalize_tag(name);
        if name.is_empty() {
            anyhow::bail!("Tag name cannot be empty");
        }

        let tag = sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO tags (id, name)
            VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING *
            "#,
        )
        .bind(TagId::new())
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;
        Ok(tag)
    }

    /// Tags in use with their resource counts, most used first
    pub async fn find_usage(pool: &PgPool) -> Result<Vec<TagUsage>> {
        sqlx::query_as::<_, TagUsage>(
            r#"
            SELECT t.name, COUNT(rt.resource_id) AS count
            FROM tags t
            INNER JOIN resource_tags rt ON rt.tag_id = t.id
            GROUP BY t.name
            ORDER BY count DESC, t.name ASC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
