//! Resource query actions

use anyhow::Result;
use tracing::debug;

use crate::common::{OffsetPagination, PageInfo, ResourceId};
use crate::domains::resources::data::ResourceWithTags;
use crate::domains::resources::models::{Resource, ResourceFilter, ResourceTag};
use crate::kernel::ServerDeps;

/// A page of the public catalog
#[derive(Debug, Clone)]
pub struct ResourcePage {
    pub resources: Vec<ResourceWithTags>,
    pub page_info: PageInfo,
}

/// List resources matching the filter, ordered by name
pub async fn list_resources(
    filter: &ResourceFilter,
    page: &OffsetPagination,
    deps: &ServerDeps,
) -> Result<ResourcePage> {
    debug!(
        resource_type = ?filter.resource_type,
        search = ?filter.search,
        limit = page.limit,
        offset = page.offset,
        "Listing resources"
    );

    let (resources, total) = Resource::find_page(filter, page, &deps.db_pool).await?;

    let ids: Vec<ResourceId> = resources.iter().map(|r| r.id).collect();
    let mut tags = ResourceTag::tag_names_for_resources(&ids, &deps.db_pool).await?;

    let page_info = PageInfo::new(total, page, resources.len());
    let resources = resources
        .into_iter()
        .map(|resource| ResourceWithTags {
            tags: tags.remove(&resource.id).unwrap_or_default(),
            resource,
        })
        .collect();

    Ok(ResourcePage {
        resources,
        page_info,
    })
}

/// Get a single resource with its tags
pub async fn get_resource(
    id: ResourceId,
    deps: &ServerDeps,
) -> Result<Option<ResourceWithTags>> {
    let Some(resource) = Resource::find_by_id_optional(id, &deps.db_pool).await? else {
        return Ok(None);
    };

    let tags = ResourceTag::tag_names_for_resource(id, &deps.db_pool).await?;
    Ok(Some(ResourceWithTags { resource, tags }))
}
