pub mod models;
pub mod normalize;

pub use models::{Tag, TagUsage};
pub use normalize::{normalize_tag, normalize_tags, parse_stored_tags, split_raw_tags};
