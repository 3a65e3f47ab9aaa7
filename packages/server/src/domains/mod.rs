// Business domains
pub mod auth;
pub mod resources;
pub mod submissions;
pub mod tag;
