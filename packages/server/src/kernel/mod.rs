//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod rate_limit;

pub use deps::ServerDeps;
pub use rate_limit::{RateLimitStatus, RateLimiter};
