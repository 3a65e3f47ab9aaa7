//! Authorization primitives shared by the HTTP layer and domain actions.

mod errors;

pub use errors::AuthError;
