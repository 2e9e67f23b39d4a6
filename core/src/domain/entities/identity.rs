//! Request-scoped identity types.

use uuid::Uuid;

use super::user::UserRecord;

/// A session that verified and is still live in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub subject_id: String,
    pub session_id: Uuid,
}

/// Identity attached to a request once the auth gate lets it through.
///
/// Lives only for the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub user: UserRecord,
    pub session_id: Uuid,
}

impl AuthenticatedIdentity {
    /// Subject the session belongs to
    pub fn subject_id(&self) -> &str {
        &self.user.id
    }
}
