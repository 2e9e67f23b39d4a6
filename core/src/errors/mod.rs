//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Shorthand for the composite authentication failure
    pub fn unauthenticated() -> Self {
        DomainError::Auth(AuthError::Unauthenticated)
    }

    /// True when the session store could not be reached
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, DomainError::Auth(AuthError::StoreUnavailable { .. }))
    }

    /// True for the composite authentication failure
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, DomainError::Auth(AuthError::Unauthenticated))
    }

    /// Collapses credential-level failures into `Unauthenticated`.
    ///
    /// Token decoding failures, missing records and rejected input all become
    /// the single undistinguished outcome. Infrastructure and internal errors
    /// pass through so they can be reported as such.
    pub fn into_unauthenticated(self) -> Self {
        match self {
            DomainError::Auth(AuthError::StoreUnavailable { .. }) | DomainError::Internal { .. } => {
                self
            }
            DomainError::Token(TokenError::GenerationFailed)
            | DomainError::Token(TokenError::KeyLoad { .. }) => self,
            _ => DomainError::unauthenticated(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
