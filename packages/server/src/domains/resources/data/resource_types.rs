//! API data types for resources

use serde::{Deserialize, Serialize};

use crate::common::{OffsetPagination, PaginationError};
use crate::domains::resources::models::{Resource, ResourceFilter, ResourceType};

/// A resource as returned by the public API, with its tag names inlined
#[derive(Debug, Clone, Serialize)]
pub struct ResourceWithTags {
    #[serde(flatten)]
    pub resource: Resource,
    pub tags: Vec<String>,
}

/// Query-string parameters for the public catalog
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceQuery {
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Longest accepted search term, in characters
pub const MAX_SEARCH_LEN: usize = 100;

/// Why a catalog query was rejected, keyed by parameter name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidQuery {
    pub field: &'static str,
    pub message: String,
}

impl ResourceQuery {
    /// Validate into a filter and page, treating empty strings as absent
    pub fn validate(&self) -> Result<(ResourceFilter, OffsetPagination), InvalidQuery> {
        let resource_type = match self.resource_type.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => Some(raw.parse::<ResourceType>().map_err(|_| InvalidQuery {
                field: "type",
                message: format!(
                    "type must be one of: {}",
                    ResourceType::ALL.map(|t| t.to_string()).join(", ")
                ),
            })?),
            None => None,
        };

        let search = self.search.clone().filter(|s| !s.is_empty());
        if let Some(search) = &search {
            if search.chars().count() > MAX_SEARCH_LEN {
                return Err(InvalidQuery {
                    field: "search",
                    message: format!("search must be at most {MAX_SEARCH_LEN} characters"),
                });
            }
        }

        let page = OffsetPagination::validate(self.limit, self.offset).map_err(|e| {
            let field = match e {
                PaginationError::LimitOutOfRange => "limit",
                PaginationError::NegativeOffset => "offset",
            };
            InvalidQuery {
                field,
                message: e.to_string(),
            }
        })?;

        Ok((
            ResourceFilter {
                resource_type,
                search,
            },
            page,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_uses_defaults() {
        let (filter, page) = ResourceQuery::default().validate().unwrap();
        assert!(filter.resource_type.is_none());
        assert!(filter.search.is_none());
        assert_eq!(page, OffsetPagination::default());
    }

    #[test]
    fn parses_type_filter() {
        let query = ResourceQuery {
            resource_type: Some("tech-hub".to_string()),
            ..Default::default()
        };
        let (filter, _) = query.validate().unwrap();
        assert_eq!(filter.resource_type, Some(ResourceType::TechHub));
    }

    #[test]
    fn rejects_unknown_type() {
        let query = ResourceQuery {
            resource_type: Some("workshop".to_string()),
            ..Default::default()
        };
        assert_eq!(query.validate().unwrap_err().field, "type");
    }

    #[test]
    fn rejects_long_search() {
        let query = ResourceQuery {
            search: Some("x".repeat(MAX_SEARCH_LEN + 1)),
            ..Default::default()
        };
        assert_eq!(query.validate().unwrap_err().field, "search");
    }

    #[test]
    fn rejects_bad_paging() {
        let query = ResourceQuery {
            limit: Some(500),
            ..Default::default()
        };
        assert_eq!(query.validate().unwrap_err().field, "limit");

        let query = ResourceQuery {
            offset: Some(-5),
            ..Default::default()
        };
        assert_eq!(query.validate().unwrap_err().field, "offset");
    }
}
