use kg_core::errors::{AuthError, DomainError};
use uuid::Uuid;

use crate::cache::session_store::session_key;
use crate::InfrastructureError;

#[test]
fn test_session_key_layout() {
    let id = Uuid::parse_str("6f1c5c3e-8f3a-4d6e-9a0b-1c2d3e4f5a6b").unwrap();
    assert_eq!(
        session_key("session:", id),
        "session:6f1c5c3e-8f3a-4d6e-9a0b-1c2d3e4f5a6b"
    );
    assert_eq!(session_key("", id), id.to_string());
}

#[test]
fn test_cache_errors_become_store_unavailable() {
    let err = InfrastructureError::Cache(redis::RedisError::from(std::io::Error::new(
        std::io::ErrorKind::TimedOut,
        "timed out",
    )));
    let domain: DomainError = err.into();
    assert!(matches!(
        domain,
        DomainError::Auth(AuthError::StoreUnavailable { .. })
    ));
}

#[test]
fn test_config_errors_are_internal() {
    let domain: DomainError = InfrastructureError::Config("bad url".to_string()).into();
    assert!(matches!(domain, DomainError::Internal { .. }));
    assert!(!domain.is_store_unavailable());
}
