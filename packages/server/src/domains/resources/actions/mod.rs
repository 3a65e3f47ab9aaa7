pub mod queries;

pub use queries::{get_resource, list_resources, ResourcePage};
