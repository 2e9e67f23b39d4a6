//! Tests for RS256 key loading

use crate::errors::{DomainError, TokenError};
use crate::services::token::Rs256KeyPair;
use crate::test_keys;

#[test]
fn test_load_from_pem_strings() {
    assert!(test_keys::access_keys().is_ok());
    assert!(test_keys::refresh_keys().is_ok());
}

#[test]
fn test_load_from_files() {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/keys/test");
    let keys = Rs256KeyPair::from_files(
        format!("{}/access_private_key.pem", dir),
        format!("{}/access_public_key.pem", dir),
    );
    assert!(keys.is_ok());
}

#[test]
fn test_missing_file_is_key_load_error() {
    let result = Rs256KeyPair::from_files("/nonexistent/private.pem", "/nonexistent/public.pem");
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::KeyLoad { .. }))
    ));
}

#[test]
fn test_garbage_pem_is_key_load_error() {
    let result = Rs256KeyPair::from_pem_strings("not a key", test_keys::ACCESS_PUBLIC_KEY);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::KeyLoad { .. }))
    ));
}

#[test]
fn test_debug_does_not_print_key_material() {
    let keys = test_keys::access_keys().unwrap();
    let printed = format!("{:?}", keys);
    assert!(printed.contains("Rs256KeyPair"));
    assert!(!printed.contains("PRIVATE KEY"));
}
