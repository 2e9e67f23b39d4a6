//! Session store contract

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;

/// Cache-backed mapping from session identifier to subject identifier.
///
/// Entries expire on their own once their TTL lapses. Implementations must be
/// safe to share across concurrently handled requests and should report
/// connectivity failures as `AuthError::StoreUnavailable`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Upserts an entry that expires after `ttl`
    async fn put(&self, session_id: Uuid, subject_id: &str, ttl: Duration) -> DomainResult<()>;

    /// Returns the subject for a live entry.
    ///
    /// `None` covers both "never existed" and "expired".
    async fn get(&self, session_id: Uuid) -> DomainResult<Option<String>>;

    /// Removes any of the given entries. Absent identifiers are not an error.
    ///
    /// Returns how many entries were actually removed.
    async fn delete(&self, session_ids: &[Uuid]) -> DomainResult<u64>;

    /// Round-trips to the backing service
    async fn health_check(&self) -> DomainResult<bool> {
        Ok(true)
    }
}
