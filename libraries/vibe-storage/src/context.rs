use crate::progress;
use async_trait::async_trait;
use sqlx::SqlitePool;
use vibe_core::{
    error::Result,
    traits::LocalProgressTier,
    types::{OwnerId, ProgressRecord, PutStatus},
};

/// Device-local progress tier backed by `SQLite`
#[derive(Clone)]
pub struct LocalProgressStore {
    pool: SqlitePool,
}

impl LocalProgressStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl LocalProgressTier for LocalProgressStore {
    async fn put(&self, record: &ProgressRecord) -> Result<PutStatus> {
        progress::upsert(&self.pool, record).await.map_err(Into::into)
    }

    async fn get_all(&self, owner_id: &OwnerId) -> Result<Vec<ProgressRecord>> {
        progress::get_all(&self.pool, owner_id)
            .await
            .map_err(Into::into)
    }
}
