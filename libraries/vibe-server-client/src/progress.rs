//! Progress operations for the Vibe server.

use crate::client::{read_json, VibeServerClient};
use crate::error::{Result, ServerClientError};
use crate::types::{SaveProgressRequest, SaveProgressResponse};
use reqwest::Client;
use tracing::debug;
use vibe_core::{OwnerId, ProgressRecord, PutStatus};

/// Progress client for the Vibe server.
pub struct ProgressClient<'a> {
    http: &'a Client,
    server: &'a VibeServerClient,
}

impl<'a> ProgressClient<'a> {
    pub(crate) fn new(http: &'a Client, server: &'a VibeServerClient) -> Self {
        Self { http, server }
    }

    /// Overwrite the server's record for the record's (owner, item).
    ///
    /// The server keeps whichever record has the later `updated_at`, so
    /// this reports [`PutStatus::Superseded`] when it already held a newer one.
    pub async fn save_progress(&self, record: &ProgressRecord) -> Result<PutStatus> {
        let url = self.server.endpoint(&[
            "api",
            "progress",
            record.owner_id.as_str(),
            record.content_item_id.as_str(),
        ])?;
        debug!(
            url = %url,
            content_item_id = %record.content_item_id,
            updated_at = record.updated_at,
            "Saving progress"
        );

        let response = self
            .http
            .put(url)
            .json(&SaveProgressRequest::from(record))
            .send()
            .await
            .map_err(|e| ServerClientError::from_transport(e, self.server.timeout()))?;

        let saved: SaveProgressResponse = read_json(response, "save progress").await?;

        Ok(if saved.applied {
            PutStatus::Applied
        } else {
            PutStatus::Superseded
        })
    }

    /// List every record the server holds for an owner.
    pub async fn list_progress(&self, owner_id: &OwnerId) -> Result<Vec<ProgressRecord>> {
        let url = self
            .server
            .endpoint(&["api", "progress", owner_id.as_str()])?;
        debug!(url = %url, owner_id = %owner_id, "Fetching progress");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ServerClientError::from_transport(e, self.server.timeout()))?;

        let records: Vec<ProgressRecord> = read_json(response, "progress list").await?;

        debug!(records = records.len(), "Fetched progress");

        Ok(records)
    }
}
