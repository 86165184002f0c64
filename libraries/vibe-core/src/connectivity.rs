//! Shared connectivity flag
//!
//! Updated by whatever watches the network (a health check, an OS
//! callback, a `--offline` switch) and read by the reconciler before each
//! remote write.

use crate::traits::ConnectivityProbe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Atomic online/offline flag, cheap to clone and to read
#[derive(Debug, Clone)]
pub struct ConnectivityFlag {
    online: Arc<AtomicBool>,
}

impl ConnectivityFlag {
    /// Create a flag with an initial state
    pub fn new(online: bool) -> Self {
        Self {
            online: Arc::new(AtomicBool::new(online)),
        }
    }

    /// Flag that starts online
    pub fn online() -> Self {
        Self::new(true)
    }

    /// Flag that starts offline
    pub fn offline() -> Self {
        Self::new(false)
    }

    /// Update the flag, returning the previous state
    pub fn set_online(&self, online: bool) -> bool {
        self.online.swap(online, Ordering::Relaxed)
    }
}

impl Default for ConnectivityFlag {
    fn default() -> Self {
        Self::online()
    }
}

impl ConnectivityProbe for ConnectivityFlag {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }
}
