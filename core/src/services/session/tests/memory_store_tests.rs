use std::time::Duration;

use uuid::Uuid;

use crate::services::session::memory_store::PURGE_INTERVAL;
use crate::services::session::{InMemorySessionStore, SessionStore};

#[tokio::test]
async fn test_put_then_get() {
    let store = InMemorySessionStore::new();
    let sid = Uuid::new_v4();

    store.put(sid, "u1", Duration::from_secs(60)).await.unwrap();

    assert_eq!(store.get(sid).await.unwrap(), Some("u1".to_string()));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_unknown_id_is_none() {
    let store = InMemorySessionStore::new();
    assert_eq!(store.get(Uuid::new_v4()).await.unwrap(), None);
    assert!(store.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn test_entries_expire_at_ttl() {
    let store = InMemorySessionStore::new();
    let sid = Uuid::new_v4();
    store.put(sid, "u1", Duration::from_secs(30)).await.unwrap();

    tokio::time::advance(Duration::from_secs(29)).await;
    assert!(store.get(sid).await.unwrap().is_some());

    tokio::time::advance(Duration::from_secs(1)).await;
    assert_eq!(store.get(sid).await.unwrap(), None);
    assert_eq!(store.len().await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_expired_entries_swept_once_per_interval() {
    let store = InMemorySessionStore::new();
    let expired = Uuid::new_v4();
    store.put(expired, "u1", Duration::from_secs(1)).await.unwrap();
    tokio::time::advance(Duration::from_secs(2)).await;

    for _ in 0..PURGE_INTERVAL - 2 {
        store.put(Uuid::new_v4(), "u2", Duration::from_secs(60)).await.unwrap();
    }
    assert!(store.holds(expired).await);
    assert_eq!(store.get(expired).await.unwrap(), None);

    store.put(Uuid::new_v4(), "u2", Duration::from_secs(60)).await.unwrap();
    assert!(!store.holds(expired).await);
    assert_eq!(store.len().await, PURGE_INTERVAL - 1);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let store = InMemorySessionStore::new();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    store.put(a, "u1", Duration::from_secs(60)).await.unwrap();
    store.put(b, "u1", Duration::from_secs(60)).await.unwrap();

    assert_eq!(store.delete(&[a, b, Uuid::new_v4()]).await.unwrap(), 2);
    assert_eq!(store.delete(&[a, b]).await.unwrap(), 0);
    assert_eq!(store.delete(&[]).await.unwrap(), 0);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_put_overwrites_existing_entry() {
    let store = InMemorySessionStore::new();
    let sid = Uuid::new_v4();
    store.put(sid, "u1", Duration::from_secs(60)).await.unwrap();
    store.put(sid, "u2", Duration::from_secs(60)).await.unwrap();

    assert_eq!(store.get(sid).await.unwrap(), Some("u2".to_string()));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_health_check_defaults_to_healthy() {
    let store = InMemorySessionStore::new();
    assert!(store.health_check().await.unwrap());
}
