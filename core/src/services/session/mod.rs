//! Session tracking and lifecycle orchestration
//!
//! The store keeps one entry per issued token, keyed by the token's session
//! identifier. The manager is the only thing that couples the token codecs to
//! the store.

mod config;
mod manager;
mod memory_store;
mod store;

#[cfg(test)]
pub(crate) mod tests;

pub use config::SessionConfig;
pub use manager::SessionManager;
pub use memory_store::InMemorySessionStore;
pub use store::SessionStore;
