//! Error types for token handling and authentication
//!
//! The variants here are branched on by type, never by message text. Messages
//! are for logs; the API layer decides what a client gets to see.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Composite outcome for every credential failure: bad token, expired
    /// token, revoked or unknown session, vanished user
    #[error("Unauthenticated")]
    Unauthenticated,

    /// The session store could not be reached or timed out
    #[error("Session store unavailable: {message}")]
    StoreUnavailable { message: String },

    /// Unknown email or wrong password, deliberately indistinguishable
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User with that email already exists")]
    EmailAlreadyExists,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token cannot be decoded, or its claims do not fit this codec
    #[error("Malformed token")]
    Malformed,

    /// The token decodes but its signature or algorithm does not verify
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Signature verifies but the embedded expiry has passed
    #[error("Token expired")]
    Expired,

    #[error("Token generation failed")]
    GenerationFailed,

    #[error("Key load error: {message}")]
    KeyLoad { message: String },
}
