//! Business services containing the session lifecycle and account use cases.

pub mod account;
pub mod auth;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use account::{AccountService, LoginInput, LoginOutcome, PasswordHasher, RegisterInput};
pub use auth::{extract_token, AuthGate};
pub use session::{InMemorySessionStore, SessionConfig, SessionManager, SessionStore};
pub use token::{Rs256KeyPair, TokenCodec};
