//! Session manager configuration

use chrono::Duration;
use kg_shared::config::{CacheConfig, JwtConfig};

/// Everything the session manager needs besides keys and a store.
///
/// Built once at startup and handed to the manager; nothing is read from the
/// environment per call.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Access token lifetime
    pub access_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_ttl: Duration,
    /// `iss` claim written and required
    pub issuer: String,
    /// `aud` claim written and required
    pub audience: String,
    /// Delete the presented refresh session when rotating
    pub revoke_on_refresh: bool,
    /// Upper bound on any single round-trip to the session store
    pub store_timeout: std::time::Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_settings(&JwtConfig::default(), &CacheConfig::default())
    }
}

impl SessionConfig {
    pub fn from_settings(jwt: &JwtConfig, cache: &CacheConfig) -> Self {
        Self {
            access_ttl: ttl_from_secs(jwt.access_token_ttl_secs),
            refresh_ttl: ttl_from_secs(jwt.refresh_token_ttl_secs),
            issuer: jwt.issuer.clone(),
            audience: jwt.audience.clone(),
            revoke_on_refresh: jwt.revoke_on_refresh,
            store_timeout: cache.operation_timeout(),
        }
    }

    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }

    pub fn with_revoke_on_refresh(mut self, revoke: bool) -> Self {
        self.revoke_on_refresh = revoke;
        self
    }

    pub fn with_store_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.store_timeout = timeout;
        self
    }
}

/// Lifetimes chrono cannot represent become zero, which issuance refuses.
fn ttl_from_secs(secs: i64) -> Duration {
    Duration::try_seconds(secs).unwrap_or_else(Duration::zero)
}
