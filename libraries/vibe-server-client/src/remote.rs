//! Remote progress tier and the health probe that gates it.

use crate::client::VibeServerClient;
use async_trait::async_trait;
use tracing::{info, warn};
use vibe_core::{
    ConnectivityFlag, OwnerId, ProgressRecord, PutStatus, RemoteProgressTier, Result,
};

/// Shared progress tier served by a Vibe progress server
#[derive(Clone)]
pub struct RemoteProgressStore {
    client: VibeServerClient,
}

impl RemoteProgressStore {
    pub fn new(client: VibeServerClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &VibeServerClient {
        &self.client
    }
}

#[async_trait]
impl RemoteProgressTier for RemoteProgressStore {
    async fn put(&self, record: &ProgressRecord) -> Result<PutStatus> {
        self.client
            .progress()
            .save_progress(record)
            .await
            .map_err(Into::into)
    }

    async fn get(&self, owner_id: &OwnerId) -> Result<Vec<ProgressRecord>> {
        self.client
            .progress()
            .list_progress(owner_id)
            .await
            .map_err(Into::into)
    }
}

/// Updates a [`ConnectivityFlag`] from the server's health endpoint
pub struct HealthProbe {
    client: VibeServerClient,
    flag: ConnectivityFlag,
}

impl HealthProbe {
    pub fn new(client: VibeServerClient, flag: ConnectivityFlag) -> Self {
        Self { client, flag }
    }

    /// Check the server once and record the result in the flag
    pub async fn refresh(&self) -> bool {
        let online = match self.client.health().await {
            Ok(_) => true,
            Err(e) => {
                warn!(url = %self.client.url(), error = %e, "Progress server unreachable");
                false
            }
        };

        let was_online = self.flag.set_online(online);
        if was_online != online {
            info!(online, "Connectivity changed");
        }

        online
    }
}
