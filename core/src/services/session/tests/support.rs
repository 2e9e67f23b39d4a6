//! Store doubles and builders shared by session and gate tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::errors::{AuthError, DomainResult};
use crate::services::session::{InMemorySessionStore, SessionConfig, SessionManager, SessionStore};
use crate::test_keys;

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

pub fn manager_with<S: SessionStore + ?Sized>(
    store: Arc<S>,
    config: SessionConfig,
) -> SessionManager<S> {
    SessionManager::new(
        store,
        test_keys::access_keys().unwrap(),
        test_keys::refresh_keys().unwrap(),
        config,
    )
}

pub fn memory_manager() -> (Arc<InMemorySessionStore>, SessionManager<InMemorySessionStore>) {
    let store = Arc::new(InMemorySessionStore::new());
    let manager = manager_with(store.clone(), SessionConfig::default());
    (store, manager)
}

fn unavailable() -> crate::errors::DomainError {
    AuthError::StoreUnavailable {
        message: "connection refused".to_string(),
    }
    .into()
}

/// Wraps the in-memory store and injects failures on demand
#[derive(Default)]
pub struct FaultyStore {
    pub inner: InMemorySessionStore,
    /// Reject writes whose TTL is longer than this
    pub fail_puts_over: Option<Duration>,
    pub fail_gets: AtomicBool,
    pub fail_deletes: AtomicBool,
    pub hang_gets: AtomicBool,
    pub deletes: AtomicUsize,
}

impl FaultyStore {
    pub fn failing_long_puts(limit: Duration) -> Self {
        Self {
            fail_puts_over: Some(limit),
            ..Self::default()
        }
    }
}

#[async_trait]
impl SessionStore for FaultyStore {
    async fn put(&self, session_id: Uuid, subject_id: &str, ttl: Duration) -> DomainResult<()> {
        if matches!(self.fail_puts_over, Some(limit) if ttl > limit) {
            return Err(unavailable());
        }
        self.inner.put(session_id, subject_id, ttl).await
    }

    async fn get(&self, session_id: Uuid) -> DomainResult<Option<String>> {
        if self.hang_gets.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.fail_gets.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.get(session_id).await
    }

    async fn delete(&self, session_ids: &[Uuid]) -> DomainResult<u64> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.delete(session_ids).await
    }

    async fn health_check(&self) -> DomainResult<bool> {
        Ok(!self.fail_gets.load(Ordering::SeqCst))
    }
}
