//! Resource domain data types (API shapes)

pub mod resource_types;

pub use resource_types::{InvalidQuery, ResourceQuery, ResourceWithTags, MAX_SEARCH_LEN};
