//! Data types for the Vibe server API.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use vibe_core::ProgressRecord;

/// Default bound on a single request, connect time included
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Server connection configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server base URL (e.g., "https://vibe.example.com")
    pub url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ServerConfig {
    /// Create a new server config with the default timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Response from `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "ok" when the server is serving
    pub status: String,
    /// Server version
    pub version: String,
}

/// Body of `PUT /api/progress/{owner}/{item}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveProgressRequest {
    pub part_index: u32,
    pub position: f64,
    pub total_duration: f64,
    pub updated_at: i64,
}

impl From<&ProgressRecord> for SaveProgressRequest {
    fn from(record: &ProgressRecord) -> Self {
        Self {
            part_index: record.part_index,
            position: record.position,
            total_duration: record.total_duration,
            updated_at: record.updated_at,
        }
    }
}

/// Response from `PUT /api/progress/{owner}/{item}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveProgressResponse {
    /// False when the server already held a newer record
    pub applied: bool,
}
