//! Sample catalog data for local development.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;

use crate::domains::resources::models::{NewResource, Resource, ResourceTag, ResourceType};
use crate::domains::tag::normalize_tags;

struct SampleResource {
    resource_type: ResourceType,
    name: &'static str,
    description: &'static str,
    link: &'static str,
    conference_date: Option<&'static str>,
    cfp_date: Option<&'static str>,
    tags: &'static [&'static str],
}

const SAMPLES: &[SampleResource] = &[
    SampleResource {
        resource_type: ResourceType::Meetup,
        name: "Rust Meetup",
        description: "Monthly talks and hack nights for Rust programmers of every level.",
        link: "https://www.meetup.com/rust-meetup/",
        conference_date: None,
        cfp_date: None,
        tags: &["Rust", "Systems Programming"],
    },
    SampleResource {
        resource_type: ResourceType::Meetup,
        name: "Women Who Code",
        description: "Community events, study groups and career talks for women in tech.",
        link: "https://www.meetup.com/women-who-code/",
        conference_date: None,
        cfp_date: None,
        tags: &["Diversity", "Career"],
    },
    SampleResource {
        resource_type: ResourceType::Conference,
        name: "DevFest",
        description: "A community-run developer festival with talks on web, cloud and AI.",
        link: "https://devfest.example.org/",
        conference_date: Some("2026-11-14"),
        cfp_date: Some("2026-09-01"),
        tags: &["Web", "Cloud", "AI"],
    },
    SampleResource {
        resource_type: ResourceType::Online,
        name: "The Rust Book",
        description: "The official free book introducing the Rust programming language.",
        link: "https://doc.rust-lang.org/book/",
        conference_date: None,
        cfp_date: None,
        tags: &["Rust", "Learning"],
    },
    SampleResource {
        resource_type: ResourceType::TechHub,
        name: "Innovation Hub",
        description: "Coworking space hosting startup office hours and community events.",
        link: "https://hub.example.org/",
        conference_date: None,
        cfp_date: None,
        tags: &["Coworking", "Startups"],
    },
];

fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>> {
    raw.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").context("Invalid sample date"))
        .transpose()
}

/// Insert the sample catalog unless the database already has resources.
/// Returns how many resources were inserted.
pub async fn seed_sample_resources(pool: &PgPool) -> Result<usize> {
    let existing = Resource::count_all(pool).await?;
    if existing > 0 {
        info!(existing, "Resources already present, skipping seed");
        return Ok(0);
    }

    let mut tx = pool.begin().await?;

    for sample in SAMPLES {
        let resource = Resource::create(
            NewResource {
                resource_type: sample.resource_type,
                name: sample.name.to_string(),
                description: sample.description.to_string(),
                link: sample.link.to_string(),
                image: None,
                conference_date: parse_date(sample.conference_date)?,
                cfp_date: parse_date(sample.cfp_date)?,
                source_submission_id: None,
            },
            &mut *tx,
        )
        .await?;

        let tags = normalize_tags(sample.tags.iter());
        ResourceTag::attach_names(resource.id, &tags, &mut *tx).await?;
    }

    tx.commit().await?;

    info!(count = SAMPLES.len(), "Seeded sample resources");
    Ok(SAMPLES.len())
}
