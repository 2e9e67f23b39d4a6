//! API response types and wrappers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard success envelope: `{"status": "success", "data": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `"success"` for this envelope
    pub status: String,

    /// Response payload
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            status: String::from("success"),
            data,
        }
    }
}

/// Overall service health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Body of the health check endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub service: String,
    pub version: String,
    pub session_store: bool,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    /// Build a health report from the session store probe result
    pub fn new(service: impl Into<String>, version: impl Into<String>, session_store: bool) -> Self {
        Self {
            status: if session_store {
                HealthStatus::Healthy
            } else {
                HealthStatus::Degraded
            },
            service: service.into(),
            version: version.into(),
            session_store,
            timestamp: Utc::now(),
        }
    }
}
