//! Tests for token extraction and request authorization

use std::sync::atomic::Ordering;
use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::user::UserRecord;
use crate::errors::{AuthError, DomainError};
use crate::repositories::{InMemoryUserDirectory, UserRegistry};
use crate::services::auth::{extract_token, AuthGate};
use crate::services::session::tests::support::{fixed_now, manager_with, FaultyStore};
use crate::services::session::{InMemorySessionStore, SessionConfig, SessionManager};

type MemoryGate = AuthGate<InMemorySessionStore, InMemoryUserDirectory>;

async fn setup() -> (MemoryGate, Arc<SessionManager<InMemorySessionStore>>, Arc<InMemoryUserDirectory>, UserRecord) {
    let sessions = Arc::new(manager_with(
        Arc::new(InMemorySessionStore::new()),
        SessionConfig::default(),
    ));
    let users = Arc::new(InMemoryUserDirectory::new());
    let user = users
        .create(UserRecord::new("Ada", "ada@example.com", "hash", Utc::now()))
        .await
        .unwrap();
    (AuthGate::new(sessions.clone(), users.clone()), sessions, users, user)
}

fn assert_unauthenticated<T: std::fmt::Debug>(result: Result<T, DomainError>) {
    assert!(
        matches!(result, Err(DomainError::Auth(AuthError::Unauthenticated))),
        "expected Unauthenticated, got {:?}",
        result
    );
}

#[test]
fn test_extract_prefers_bearer_header() {
    let token = extract_token(Some("Bearer header-token"), Some("cookie-token"));
    assert_eq!(token, Some("header-token"));
}

#[test]
fn test_extract_scheme_is_case_insensitive() {
    assert_eq!(extract_token(Some("bearer abc"), None), Some("abc"));
    assert_eq!(extract_token(Some("BEARER abc"), None), Some("abc"));
}

#[test]
fn test_extract_falls_back_to_cookie_on_malformed_header() {
    for header in ["Basic abc", "Bearer", "Bearer a b", "", "abc"] {
        assert_eq!(
            extract_token(Some(header), Some("cookie-token")),
            Some("cookie-token"),
            "header {:?}",
            header
        );
    }
}

#[test]
fn test_extract_nothing() {
    assert_eq!(extract_token(None, None), None);
    assert_eq!(extract_token(None, Some("")), None);
    assert_eq!(extract_token(Some("Basic x"), Some("  ")), None);
}

#[tokio::test]
async fn test_authorize_with_header() {
    let (gate, sessions, _, user) = setup().await;
    let now = fixed_now();
    let pair = sessions.login(&user.id, now).await.unwrap();

    let header = format!("Bearer {}", pair.access.token);
    let identity = gate.authorize(Some(&header), None, now).await.unwrap();

    assert_eq!(identity.user, user);
    assert_eq!(identity.session_id, pair.access.session_id);
    assert_eq!(identity.subject_id(), user.id);
}

#[tokio::test]
async fn test_authorize_with_cookie() {
    let (gate, sessions, _, user) = setup().await;
    let now = fixed_now();
    let pair = sessions.login(&user.id, now).await.unwrap();

    let identity = gate
        .authorize(None, Some(&pair.access.token), now)
        .await
        .unwrap();
    assert_eq!(identity.user.id, user.id);
}

#[tokio::test]
async fn test_valid_header_wins_over_bad_cookie() {
    let (gate, sessions, _, user) = setup().await;
    let now = fixed_now();
    let pair = sessions.login(&user.id, now).await.unwrap();

    let header = format!("Bearer {}", pair.access.token);
    assert!(gate.authorize(Some(&header), Some("junk"), now).await.is_ok());
}

#[tokio::test]
async fn test_missing_token_is_unauthenticated() {
    let (gate, _, _, _) = setup().await;
    assert_unauthenticated(gate.authorize(None, None, fixed_now()).await);
}

#[tokio::test]
async fn test_revoked_session_is_unauthenticated() {
    let (gate, sessions, _, user) = setup().await;
    let now = fixed_now();
    let pair = sessions.login(&user.id, now).await.unwrap();

    sessions
        .logout(Some(&pair.access.token), Some(&pair.refresh.token), now)
        .await
        .unwrap();

    assert_unauthenticated(gate.authorize(None, Some(&pair.access.token), now).await);
}

#[tokio::test]
async fn test_deleted_user_is_unauthenticated_not_not_found() {
    let (gate, sessions, users, user) = setup().await;
    let now = fixed_now();
    let pair = sessions.login(&user.id, now).await.unwrap();

    users.remove(&user.id).await;

    assert_unauthenticated(gate.authorize(None, Some(&pair.access.token), now).await);
}

#[tokio::test]
async fn test_store_outage_passes_through() {
    let store = Arc::new(FaultyStore::default());
    let sessions = Arc::new(manager_with(store.clone(), SessionConfig::default()));
    let users = Arc::new(InMemoryUserDirectory::new());
    let user = users
        .create(UserRecord::new("Ada", "ada@example.com", "hash", Utc::now()))
        .await
        .unwrap();
    let gate = AuthGate::new(sessions.clone(), users);
    let now = fixed_now();
    let pair = sessions.login(&user.id, now).await.unwrap();

    store.fail_gets.store(true, Ordering::SeqCst);

    let result = gate.authorize(None, Some(&pair.access.token), now).await;
    assert!(matches!(result, Err(ref e) if e.is_store_unavailable()));
}
