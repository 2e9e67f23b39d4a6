//! Authentication configuration: token lifetimes, signing keys, cookies

use serde::{Deserialize, Serialize};

use super::env_parse;
use super::environment::Environment;

/// Default access token lifetime (15 minutes)
const DEFAULT_ACCESS_TTL_SECS: i64 = 900;

/// Default refresh token lifetime (7 days)
const DEFAULT_REFRESH_TTL_SECS: i64 = 604_800;

/// JWT issuance configuration
///
/// Access and refresh tokens are signed with separate RS256 key pairs so a
/// token of one kind can never verify as the other.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Access token lifetime in seconds
    pub access_token_ttl_secs: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_ttl_secs: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,

    /// PEM private key used to sign access tokens
    pub access_private_key_path: String,

    /// PEM public key used to verify access tokens
    pub access_public_key_path: String,

    /// PEM private key used to sign refresh tokens
    pub refresh_private_key_path: String,

    /// PEM public key used to verify refresh tokens
    pub refresh_public_key_path: String,

    /// Delete the presented refresh session when it is rotated
    #[serde(default = "default_revoke_on_refresh")]
    pub revoke_on_refresh: bool,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_token_ttl_secs: DEFAULT_ACCESS_TTL_SECS,
            refresh_token_ttl_secs: DEFAULT_REFRESH_TTL_SECS,
            issuer: String::from("keygate"),
            audience: String::from("keygate-api"),
            access_private_key_path: String::from("keys/access_private_key.pem"),
            access_public_key_path: String::from("keys/access_public_key.pem"),
            refresh_private_key_path: String::from("keys/refresh_private_key.pem"),
            refresh_public_key_path: String::from("keys/refresh_public_key.pem"),
            revoke_on_refresh: default_revoke_on_refresh(),
        }
    }
}

impl JwtConfig {
    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            access_token_ttl_secs: env_parse("JWT_ACCESS_TOKEN_TTL")
                .unwrap_or(defaults.access_token_ttl_secs),
            refresh_token_ttl_secs: env_parse("JWT_REFRESH_TOKEN_TTL")
                .unwrap_or(defaults.refresh_token_ttl_secs),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or(defaults.audience),
            access_private_key_path: std::env::var("JWT_ACCESS_PRIVATE_KEY_PATH")
                .unwrap_or(defaults.access_private_key_path),
            access_public_key_path: std::env::var("JWT_ACCESS_PUBLIC_KEY_PATH")
                .unwrap_or(defaults.access_public_key_path),
            refresh_private_key_path: std::env::var("JWT_REFRESH_PRIVATE_KEY_PATH")
                .unwrap_or(defaults.refresh_private_key_path),
            refresh_public_key_path: std::env::var("JWT_REFRESH_PUBLIC_KEY_PATH")
                .unwrap_or(defaults.refresh_public_key_path),
            revoke_on_refresh: env_parse("JWT_REVOKE_ON_REFRESH")
                .unwrap_or(defaults.revoke_on_refresh),
        }
    }

    /// Set access token lifetime in minutes
    pub fn with_access_ttl_minutes(mut self, minutes: i64) -> Self {
        self.access_token_ttl_secs = minutes * 60;
        self
    }

    /// Set refresh token lifetime in days
    pub fn with_refresh_ttl_days(mut self, days: i64) -> Self {
        self.refresh_token_ttl_secs = days * 86_400;
        self
    }

    /// Checks lifetimes for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.access_token_ttl_secs <= 0 {
            return Err("access token TTL must be positive".to_string());
        }
        if self.refresh_token_ttl_secs <= 0 {
            return Err("refresh token TTL must be positive".to_string());
        }
        if self.refresh_token_ttl_secs > MAX_TOKEN_TTL_SECS {
            return Err(format!(
                "refresh token TTL must not exceed {} seconds",
                MAX_TOKEN_TTL_SECS
            ));
        }
        if self.access_token_ttl_secs > self.refresh_token_ttl_secs {
            return Err("access token TTL must not exceed refresh token TTL".to_string());
        }
        Ok(())
    }
}

/// Longest accepted token lifetime (ten years)
pub const MAX_TOKEN_TTL_SECS: i64 = 10 * 365 * 86_400;

/// Cookie transport configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Cookie domain; host-only cookies when unset
    #[serde(default)]
    pub domain: Option<String>,

    /// Send cookies over HTTPS only
    pub secure: bool,

    /// SameSite attribute (Strict, Lax or None)
    pub same_site: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            domain: None,
            secure: false,
            same_site: String::from("Lax"),
        }
    }
}

impl CookieConfig {
    /// Create cookie configuration for an environment
    pub fn for_environment(env: Environment) -> Self {
        Self {
            domain: std::env::var("COOKIE_DOMAIN").ok().filter(|d| !d.is_empty()),
            secure: env_parse("COOKIE_SECURE").unwrap_or(env.is_production()),
            same_site: std::env::var("COOKIE_SAME_SITE").unwrap_or_else(|_| String::from("Lax")),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Cookie configuration
    #[serde(default)]
    pub cookies: CookieConfig,

    /// Work factor for password hashing
    #[serde(default = "default_password_hash_cost")]
    pub password_hash_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            cookies: CookieConfig::default(),
            password_hash_cost: default_password_hash_cost(),
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env(env: Environment) -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            cookies: CookieConfig::for_environment(env),
            password_hash_cost: env_parse("PASSWORD_HASH_COST")
                .unwrap_or_else(default_password_hash_cost),
        }
    }
}

fn default_password_hash_cost() -> u32 {
    12
}

fn default_revoke_on_refresh() -> bool {
    true
}
