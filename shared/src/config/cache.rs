//! Session store configuration

use serde::{Deserialize, Serialize};

use super::env_parse;

/// Which session store implementation the server runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Redis, shared between server instances
    Redis,
    /// Process-local map, for development and tests
    Memory,
}

impl std::str::FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(CacheBackend::Redis),
            "memory" | "in-memory" => Ok(CacheBackend::Memory),
            _ => Err(format!("Invalid cache backend: {}", s)),
        }
    }
}

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Store implementation
    pub backend: CacheBackend,

    /// Redis connection URL
    pub url: String,

    /// Prefix prepended to every session key
    pub key_prefix: String,

    /// Upper bound on a single store round-trip, in milliseconds
    pub operation_timeout_ms: u64,

    /// Maximum attempts for a retriable Redis failure
    pub max_retries: u32,

    /// Base delay between retries (doubled per attempt), in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Redis,
            url: String::from("redis://localhost:6379"),
            key_prefix: String::from("session:"),
            operation_timeout_ms: 2000,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: env_parse("CACHE_BACKEND").unwrap_or(defaults.backend),
            url: std::env::var("REDIS_URL").unwrap_or(defaults.url),
            key_prefix: std::env::var("SESSION_KEY_PREFIX").unwrap_or(defaults.key_prefix),
            operation_timeout_ms: env_parse("CACHE_OPERATION_TIMEOUT_MS")
                .unwrap_or(defaults.operation_timeout_ms),
            max_retries: env_parse("REDIS_MAX_RETRIES").unwrap_or(defaults.max_retries),
            retry_delay_ms: env_parse("REDIS_RETRY_DELAY_MS").unwrap_or(defaults.retry_delay_ms),
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Store round-trip timeout as a duration
    pub fn operation_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.operation_timeout_ms)
    }
}
