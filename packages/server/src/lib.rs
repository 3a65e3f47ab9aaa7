// Community Resource Directory - API Core
//
// This crate provides the backend API for the community directory: the public
// resource catalog, the submission form, and the admin moderation queue.
// Architecture follows domain-driven design: domains/* hold models and
// actions, server/ maps them onto HTTP.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
