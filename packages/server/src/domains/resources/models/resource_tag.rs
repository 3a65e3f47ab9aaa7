//! ResourceTag model - ordered tag associations for resources

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use std::collections::HashMap;

use crate::common::{ResourceId, TagId};
use crate::domains::tag::models::Tag;

/// ResourceTag - association between a resource and a tag
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ResourceTag {
    pub resource_id: ResourceId,
    pub tag_id: TagId,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

impl ResourceTag {
    /// Tag names for a resource, in submission order
    pub async fn tag_names_for_resource(
        resource_id: ResourceId,
        pool: &PgPool,
    ) -> Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT t.name
            FROM tags t
            INNER JOIN resource_tags rt ON rt.tag_id = t.id
            WHERE rt.resource_id = $1
            ORDER BY rt.position ASC, t.name ASC
            "#,
        )
        .bind(resource_id)
        .fetch_all(pool)
        .await?;
        Ok(names)
    }

    /// Batch-load tag names for a page of resources
    pub async fn tag_names_for_resources(
        resource_ids: &[ResourceId],
        pool: &PgPool,
    ) -> Result<HashMap<ResourceId, Vec<String>>> {
        if resource_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, (ResourceId, String)>(
            r#"
            SELECT rt.resource_id, t.name
            FROM resource_tags rt
            INNER JOIN tags t ON t.id = rt.tag_id
            WHERE rt.resource_id = ANY($1)
            ORDER BY rt.resource_id, rt.position ASC, t.name ASC
            "#,
        )
        .bind(resource_ids)
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<ResourceId, Vec<String>> = HashMap::new();
        for (resource_id, name) in rows {
            grouped.entry(resource_id).or_default().push(name);
        }
        Ok(grouped)
    }

    /// Link a tag to a resource (ignores duplicates)
    pub async fn add(
        resource_id: ResourceId,
        tag_id: TagId,
        position: i32,
        conn: &mut PgConnection,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO resource_tags (resource_id, tag_id, position)
            VALUES ($1, $2, $3)
            ON CONFLICT (resource_id, tag_id) DO NOTHING
            "#,
        )
        .bind(resource_id)
        .bind(tag_id)
        .bind(position)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Upsert each tag by name and link it, preserving the given order
    pub async fn attach_names(
        resource_id: ResourceId,
        names: &[String],
        conn: &mut PgConnection,
    ) -> Result<Vec<Tag>> {
        let mut tags = Vec::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            let tag = Tag::find_or_create(name, conn).await?;
            Self::add(resource_id, tag.id, position as i32, conn).await?;
            tags.push(tag);
        }
        Ok(tags)
    }
}
