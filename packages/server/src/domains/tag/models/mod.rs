pub mod tag;

pub use tag::{Tag, TagUsage};
