// HTTP middleware
pub mod admin_guard;
pub mod ip_extractor;
pub mod jwt_auth;

pub use admin_guard::*;
pub use ip_extractor::*;
pub use jwt_auth::*;
