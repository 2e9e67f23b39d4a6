//! Domain entities representing core business objects.

pub mod identity;
pub mod token;
pub mod user;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use identity::{ActiveSession, AuthenticatedIdentity};
pub use token::{Claims, IssuedToken, TokenKind, TokenPair};
pub use user::{UserProfile, UserRecord, DEFAULT_ROLE};
