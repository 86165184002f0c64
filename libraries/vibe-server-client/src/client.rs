//! Main Vibe server client.

use crate::error::{Result, ServerClientError};
use crate::progress::ProgressClient;
use crate::types::{HealthResponse, ServerConfig};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Client for a Vibe progress server.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```ignore
/// use vibe_server_client::{ServerConfig, VibeServerClient};
///
/// let client = VibeServerClient::new(ServerConfig::new("https://vibe.example.com"))?;
/// let health = client.health().await?;
/// ```
#[derive(Clone)]
pub struct VibeServerClient {
    http: Client,
    url: String,
    timeout: Duration,
}

impl VibeServerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        // Validate URL
        if config.url.is_empty() {
            return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ServerClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        Url::parse(&url).map_err(|e| ServerClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .user_agent(format!("Vibe/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ServerClientError::Request)?;

        Ok(Self {
            http,
            url,
            timeout: config.timeout,
        })
    }

    /// Get the server URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Check that the server is up.
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = self.endpoint(&["api", "health"])?;
        debug!(url = %url, "Checking server health");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ServerClientError::from_transport(e, self.timeout))?;

        let health: HealthResponse = read_json(response, "health").await?;

        info!(status = %health.status, version = %health.version, "Server reachable");

        Ok(health)
    }

    /// Get a client for progress operations.
    pub fn progress(&self) -> ProgressClient<'_> {
        ProgressClient::new(&self.http, self)
    }

    /// Build an endpoint URL, percent-encoding each path segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url =
            Url::parse(&self.url).map_err(|e| ServerClientError::InvalidUrl(e.to_string()))?;
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                ServerClientError::InvalidUrl(format!("{} cannot be a base URL", self.url))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }
}

/// Decode a JSON body on success, or turn the response into a `ServerError`.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        response.json().await.map_err(|e| {
            ServerClientError::ParseError(format!("Failed to parse {} response: {}", what, e))
        })
    } else {
        let error_text = response.text().await.unwrap_or_default();
        Err(ServerClientError::ServerError {
            status: status.as_u16(),
            message: error_text,
        })
    }
}
