//! In-process session store

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

use crate::errors::DomainResult;

use super::store::SessionStore;

/// Writes between sweeps of expired entries
pub(crate) const PURGE_INTERVAL: usize = 256;

#[derive(Debug, Clone)]
struct Entry {
    subject_id: String,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct State {
    entries: HashMap<Uuid, Entry>,
    writes_since_purge: usize,
}

/// Session store held in process memory.
///
/// Expired entries are invisible to readers. They are swept out once every
/// [`PURGE_INTERVAL`] writes, so a put stays O(1) amortised. Used for
/// single-node development and tests; sessions do not survive a restart.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    state: RwLock<State>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.state
            .read()
            .await
            .entries
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Whether an entry is still held, expired or not
    #[cfg(test)]
    pub(crate) async fn holds(&self, session_id: Uuid) -> bool {
        self.state.read().await.entries.contains_key(&session_id)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put(&self, session_id: Uuid, subject_id: &str, ttl: Duration) -> DomainResult<()> {
        let now = Instant::now();
        let mut state = self.state.write().await;

        state.writes_since_purge += 1;
        if state.writes_since_purge >= PURGE_INTERVAL {
            state.writes_since_purge = 0;
            state.entries.retain(|_, entry| entry.expires_at > now);
        }

        state.entries.insert(
            session_id,
            Entry {
                subject_id: subject_id.to_string(),
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    async fn get(&self, session_id: Uuid) -> DomainResult<Option<String>> {
        let state = self.state.read().await;
        Ok(state
            .entries
            .get(&session_id)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.subject_id.clone()))
    }

    async fn delete(&self, session_ids: &[Uuid]) -> DomainResult<u64> {
        let now = Instant::now();
        let mut state = self.state.write().await;
        let removed = session_ids
            .iter()
            .filter_map(|id| state.entries.remove(id))
            .filter(|entry| entry.expires_at > now)
            .count();
        Ok(removed as u64)
    }
}
