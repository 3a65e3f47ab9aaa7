//! Auth domain - gates the moderation API behind a shared admin password
//!
//! The identity provider is one configured password, exchanged for a JWT at
//! login or presented directly via HTTP Basic. Everything downstream only asks
//! "is this request an authenticated admin?".

pub mod actions;
pub mod credentials;
pub mod jwt;

pub use actions::{login, LoginResult};
pub use credentials::{parse_basic_auth, AdminCredentials, BasicCredentials, ADMIN_SUBJECT};
pub use jwt::{Claims, JwtService};
