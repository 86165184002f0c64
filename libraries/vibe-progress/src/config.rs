//! Reconciler and session tuning

use std::time::Duration;

/// Tuning for the write path and the playback ticker
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressConfig {
    /// Positions below this many seconds are never persisted (default: 5)
    pub min_position_secs: f64,

    /// Bound on every remote tier call (default: 5s)
    pub remote_timeout: Duration,

    /// Period of the playback ticker (default: 10s)
    pub tick_interval: Duration,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            min_position_secs: 5.0,
            remote_timeout: Duration::from_secs(5),
            tick_interval: Duration::from_secs(10),
        }
    }
}

impl ProgressConfig {
    #[must_use]
    pub fn with_remote_timeout(mut self, timeout: Duration) -> Self {
        self.remote_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }
}
