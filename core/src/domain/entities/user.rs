//! User record as handed back by the user directory.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role assigned to self-registered accounts
pub const DEFAULT_ROLE: &str = "user";

/// Stored user record
///
/// The core only reads `id` and `password_hash`; the rest is carried through
/// to the client-facing profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique identifier, used as the token subject
    pub id: String,

    /// Display name
    pub name: String,

    /// Lower-cased email address
    pub email: String,

    /// One-way password hash
    pub password_hash: String,

    /// Role carried for downstream authorization
    pub role: String,

    /// Whether the account is verified
    pub verified: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Creates a new verified user with the default role
    pub fn new(
        name: impl Into<String>,
        email: &str,
        password_hash: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.trim().to_lowercase(),
            password_hash: password_hash.into(),
            role: DEFAULT_ROLE.to_string(),
            verified: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Public view of the record, without the password hash
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            created_at: self.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            updated_at: self.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Client-facing user profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}
