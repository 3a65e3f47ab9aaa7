//! Resources domain - the public catalog
//!
//! Resources are read by the public site and written only when an admin
//! approves a submission (or by the development seeder).

pub mod actions;
pub mod data;
pub mod models;
pub mod seed;

pub use models::{
    NewResource, Resource, ResourceFilter, ResourceTag, ResourceType, PLACEHOLDER_IMAGE,
};

pub use data::{ResourceQuery, ResourceWithTags};

pub use actions::{get_resource, list_resources, ResourcePage};
