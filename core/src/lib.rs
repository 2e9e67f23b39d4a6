//! # KeyGate Core
//!
//! Session lifecycle for the KeyGate backend: token issuance and
//! verification, the session store contract, refresh rotation, revocation
//! and the request auth gate. Infrastructure adapters live in `kg_infra`,
//! the HTTP surface in `kg_api`.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    ActiveSession, AuthenticatedIdentity, Claims, IssuedToken, TokenKind, TokenPair,
    UserProfile, UserRecord,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{InMemoryUserDirectory, UserDirectory, UserRegistry};
pub use services::{
    extract_token, AccountService, AuthGate, InMemorySessionStore, LoginInput, LoginOutcome, PasswordHasher,
    RegisterInput, Rs256KeyPair, SessionConfig, SessionManager, SessionStore, TokenCodec,
};

/// RSA key pairs checked in for tests. Never use these outside of tests.
#[cfg(any(test, feature = "test-keys"))]
pub mod test_keys {
    use crate::errors::DomainError;
    use crate::services::token::Rs256KeyPair;

    pub const ACCESS_PRIVATE_KEY: &str = include_str!("../keys/test/access_private_key.pem");
    pub const ACCESS_PUBLIC_KEY: &str = include_str!("../keys/test/access_public_key.pem");
    pub const REFRESH_PRIVATE_KEY: &str = include_str!("../keys/test/refresh_private_key.pem");
    pub const REFRESH_PUBLIC_KEY: &str = include_str!("../keys/test/refresh_public_key.pem");

    pub fn access_keys() -> Result<Rs256KeyPair, DomainError> {
        Rs256KeyPair::from_pem_strings(ACCESS_PRIVATE_KEY, ACCESS_PUBLIC_KEY)
    }

    pub fn refresh_keys() -> Result<Rs256KeyPair, DomainError> {
        Rs256KeyPair::from_pem_strings(REFRESH_PRIVATE_KEY, REFRESH_PUBLIC_KEY)
    }
}
