//! Shared configuration and common types for the KeyGate server
//!
//! This crate provides functionality used across all server crates:
//! - Configuration types, built from the environment by the binary
//! - Error response structures and error codes
//! - API response envelopes

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheBackend, CacheConfig, CookieConfig, Environment, JwtConfig,
    LogFormat, LoggingConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{ApiResponse, HealthResponse, HealthStatus};
