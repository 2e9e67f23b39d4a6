//! User directory traits.
//!
//! The session lifecycle only ever reads users. Registration goes through the
//! narrower [`UserRegistry`] extension so read-only consumers such as the auth
//! gate can depend on [`UserDirectory`] alone.

use async_trait::async_trait;

use crate::domain::entities::user::UserRecord;
use crate::errors::DomainError;

/// Read access to user records
///
/// # Example
/// ```no_run
/// # use kg_core::repositories::UserDirectory;
/// # async fn example(users: &impl UserDirectory) -> Result<(), kg_core::errors::DomainError> {
/// if let Some(user) = users.find_by_email("ada@example.com").await? {
///     println!("found {}", user.id);
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(UserRecord))` - User found
    /// * `Ok(None)` - No user with that id
    /// * `Err(DomainError)` - Lookup failed
    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, DomainError>;

    /// Find a user by email. Callers pass the address lower-cased.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError>;
}

/// Write access used by account registration
#[async_trait]
pub trait UserRegistry: UserDirectory {
    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(UserRecord)` - The stored record
    /// * `Err(AuthError::EmailAlreadyExists)` - Email is taken
    async fn create(&self, user: UserRecord) -> Result<UserRecord, DomainError>;
}
