//! Player configuration
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use vibe_progress::ProgressConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerConfig {
    /// Owner whose progress this device records
    #[serde(default = "default_owner_id")]
    pub owner_id: String,

    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_progress")]
    pub progress: ProgressSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_server_url")]
    pub url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProgressSettings {
    #[serde(default = "default_min_position_secs")]
    pub min_position_secs: f64,

    #[serde(default = "default_tick_interval_secs")]
    pub tick_interval_secs: u64,
}

impl PlayerConfig {
    /// Load from a file (if present) and `VIBE_PLAYER_*` environment variables
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        let mut settings = config::Config::builder();

        if config_path.exists() {
            settings = settings.add_source(config::File::from(PathBuf::from(config_path)));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("VIBE_PLAYER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(settings.build()?.try_deserialize()?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owner_id.trim().is_empty() {
            return Err(ConfigError::Invalid("owner_id is required".to_string()));
        }

        if self.server.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "server.timeout_secs must be at least 1".to_string(),
            ));
        }

        if !self.progress.min_position_secs.is_finite() || self.progress.min_position_secs < 0.0 {
            return Err(ConfigError::Invalid(
                "progress.min_position_secs must be a non-negative number".to_string(),
            ));
        }

        if self.progress.tick_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "progress.tick_interval_secs must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.server.timeout_secs)
    }

    pub fn progress_config(&self) -> ProgressConfig {
        ProgressConfig {
            min_position_secs: self.progress.min_position_secs,
            remote_timeout: self.remote_timeout(),
            tick_interval: Duration::from_secs(self.progress.tick_interval_secs),
        }
    }
}

// Default values
fn default_owner_id() -> String {
    "user_123".to_string()
}

fn default_server() -> ServerSettings {
    ServerSettings {
        url: default_server_url(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_server_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/vibe-player.db".to_string()
}

fn default_progress() -> ProgressSettings {
    ProgressSettings {
        min_position_secs: default_min_position_secs(),
        tick_interval_secs: default_tick_interval_secs(),
    }
}

fn default_min_position_secs() -> f64 {
    5.0
}

fn default_tick_interval_secs() -> u64 {
    10
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            owner_id: default_owner_id(),
            server: default_server(),
            storage: default_storage(),
            progress: default_progress(),
        }
    }
}
