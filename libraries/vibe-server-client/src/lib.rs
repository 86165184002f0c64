//! Vibe Server Client
//!
//! HTTP client library for the Vibe progress server, and the remote
//! progress tier built on it.
//!
//! # Features
//!
//! - **Progress**: overwrite one record, list an owner's records
//! - **Health**: reachability check that drives the connectivity flag
//! - **Remote tier**: [`RemoteProgressStore`] implements `RemoteProgressTier`
//!
//! # Example
//!
//! ```ignore
//! use vibe_server_client::{ServerConfig, VibeServerClient};
//! use vibe_core::OwnerId;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = VibeServerClient::new(ServerConfig::new("https://vibe.example.com"))?;
//!
//!     let health = client.health().await?;
//!     println!("Server {} is {}", health.version, health.status);
//!
//!     let records = client.progress().list_progress(&OwnerId::new("user_123")).await?;
//!     println!("Found {} records", records.len());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod progress;
mod remote;
mod types;

// Re-export main types
pub use client::VibeServerClient;
pub use error::{Result, ServerClientError};
pub use progress::ProgressClient;
pub use remote::{HealthProbe, RemoteProgressStore};
pub use types::{HealthResponse, SaveProgressRequest, SaveProgressResponse, ServerConfig};
