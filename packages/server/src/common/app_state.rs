//! Request-scoped visitor state handed to domain actions.

use super::auth::AuthError;

/// Who is performing an action.
///
/// Built by the HTTP layer from the authenticated user (if any) and passed
/// into actions so that authorization is checked where the write happens.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// Subject of the authenticated session (the admin username), if any.
    pub visitor: Option<String>,
    /// Whether the visitor has admin privileges.
    pub is_admin: bool,
}

impl AppState {
    pub fn authenticated(visitor: impl Into<String>, is_admin: bool) -> Self {
        Self {
            visitor: Some(visitor.into()),
            is_admin,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Returns false for unauthenticated visitors.
    pub fn is_admin(&self) -> bool {
        self.visitor.is_some() && self.is_admin
    }

    /// Require the visitor to be an admin, returning the admin's subject.
    pub fn require_admin(&self) -> Result<&str, AuthError> {
        let visitor = self
            .visitor
            .as_deref()
            .ok_or(AuthError::AuthenticationRequired)?;
        if !self.is_admin {
            return Err(AuthError::AdminRequired);
        }
        Ok(visitor)
    }
}
