pub mod resource;
pub mod resource_tag;

pub use resource::{NewResource, Resource, ResourceFilter, ResourceType, PLACEHOLDER_IMAGE};
pub use resource_tag::ResourceTag;
