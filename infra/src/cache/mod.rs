//! Cache module for Redis-backed session tracking
//!
//! Connection management, retry logic and the `SessionStore` adapter.

pub mod redis_client;
pub mod session_store;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use session_store::RedisSessionStore;

// Re-export commonly used types
pub use kg_shared::config::CacheConfig;
