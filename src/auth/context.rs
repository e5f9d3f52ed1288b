//! Request-scoped identity.

use crate::types::User;

/// Who made the current request, as decided by the authentication middleware.
///
/// Created fresh for every request and stored in the request extensions.
/// Handlers never see a half-resolved identity: a token whose subject no
/// longer exists produces `Anonymous`, same as no token at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthContext {
    /// No usable credential was presented.
    #[default]
    Anonymous,
    /// The bearer token verified and its subject resolved to this user.
    User(User),
}

impl AuthContext {
    /// Returns the resolved user, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthContext::User(user) => Some(user),
            AuthContext::Anonymous => None,
        }
    }

    /// Consumes the context, returning the resolved user, if any.
    pub fn into_user(self) -> Option<User> {
        match self {
            AuthContext::User(user) => Some(user),
            AuthContext::Anonymous => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, AuthContext::Anonymous)
    }
}
