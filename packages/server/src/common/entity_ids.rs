//! Typed ID definitions for the directory's entities.

pub use super::id::Id;

/// Marker type for catalog resources.
pub struct Resource;

/// Marker type for public submissions awaiting moderation.
pub struct Submission;

/// Marker type for tags.
pub struct Tag;

pub type ResourceId = Id<Resource>;

pub type SubmissionId = Id<Submission>;

pub type TagId = Id<Tag>;
