// HTTP routes
pub mod admin;
pub mod auth;
pub mod health;
pub mod resources;
pub mod submissions;

pub use admin::*;
pub use auth::*;
pub use health::*;
pub use resources::*;
pub use submissions::*;
