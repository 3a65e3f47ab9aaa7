// Common types and utilities shared across the application

pub mod app_state;
pub mod auth;
pub mod entity_ids;
pub mod id;
pub mod pagination;

pub use app_state::AppState;
pub use auth::AuthError;
pub use entity_ids::*;
pub use id::Id;
pub use pagination::{OffsetPagination, PageInfo, PaginationError};
