//! # Infrastructure Layer
//!
//! Concrete adapters for the ports defined in `kg_core`:
//!
//! - **Cache**: Redis client with retry, and the Redis-backed session store
//! - **Security**: bcrypt password hashing

/// Cache module - Redis client and session store
pub mod cache;

/// Security module - password hashing
pub mod security;

pub use cache::{RedisClient, RedisSessionStore};
pub use security::BcryptPasswordHasher;

use kg_core::errors::{AuthError, DomainError};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Password hashing error
    #[error("Hashing error: {0}")]
    Hashing(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Cache(e) => AuthError::StoreUnavailable {
                message: e.to_string(),
            }
            .into(),
            InfrastructureError::Config(message) => DomainError::Internal { message },
            InfrastructureError::Hashing(message) => DomainError::Internal { message },
        }
    }
}
