//! Public catalog endpoints

use axum::{
    extract::{Extension, Path, Query},
    http::header::CACHE_CONTROL,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::common::{PageInfo, ResourceId};
use crate::domains::resources::{get_resource, list_resources, ResourceQuery, ResourceWithTags};
use crate::domains::submissions::ValidationErrors;
use crate::domains::tag::{Tag, TagUsage};
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;

/// Edge caches may serve the catalog for a minute and revalidate for two more
pub const CATALOG_CACHE_CONTROL: &str = "public, s-maxage=60, stale-while-revalidate=120";

#[derive(Serialize)]
pub struct ResourceListResponse {
    success: bool,
    data: Vec<ResourceWithTags>,
    pagination: PageInfo,
}

#[derive(Serialize)]
pub struct ResourceResponse {
    success: bool,
    data: ResourceWithTags,
}

#[derive(Serialize)]
pub struct TagListResponse {
    success: bool,
    data: Vec<TagUsage>,
}

/// GET /api/resources
pub async fn list_resources_handler(
    Extension(state): Extension<AxumAppState>,
    query: Option<Query<ResourceQuery>>,
) -> Result<Response, ApiError> {
    // Unparsable numbers reach us as a failed extraction
    let Some(Query(query)) = query else {
        return Err(ApiError::BadRequest("Invalid query parameters".to_string()));
    };

    let (filter, page) = query.validate().map_err(|invalid| {
        ApiError::validation(
            "Invalid query parameters",
            ValidationErrors::field(invalid.field, invalid.message),
        )
    })?;

    let page_result = list_resources(&filter, &page, &state.server_deps).await?;

    Ok((
        [(CACHE_CONTROL, CATALOG_CACHE_CONTROL)],
        Json(ResourceListResponse {
            success: true,
            data: page_result.resources,
            pagination: page_result.page_info,
        }),
    )
        .into_response())
}

/// GET /api/resources/:id
pub async fn get_resource_handler(
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<String>,
) -> Result<Json<ResourceResponse>, ApiError> {
    let id = ResourceId::parse(&id)
        .map_err(|_| ApiError::BadRequest("Invalid resource ID".to_string()))?;

    let resource = get_resource(id, &state.server_deps)
        .await?
        .ok_or_else(|| ApiError::NotFound("Resource not found".to_string()))?;

    Ok(Json(ResourceResponse {
        success: true,
        data: resource,
    }))
}

/// GET /api/tags
pub async fn list_tags_handler(
    Extension(state): Extension<AxumAppState>,
) -> Result<Response, ApiError> {
    let tags = Tag::find_usage(&state.db_pool).await?;

    Ok((
        [(CACHE_CONTROL, CATALOG_CACHE_CONTROL)],
        Json(TagListResponse {
            success: true,
            data: tags,
        }),
    )
        .into_response())
}
