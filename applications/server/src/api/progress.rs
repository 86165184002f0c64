/// Progress API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use vibe_core::{ContentItemId, OwnerId, ProgressRecord, PutStatus};

/// Body of `PUT /api/progress/:owner_id/:content_item_id`
///
/// Every field is optional. Missing numbers are stored as 0 and a missing
/// `updated_at` is stamped with the server's clock.
#[derive(Debug, Default, Deserialize)]
pub struct SaveProgressBody {
    pub part_index: Option<u32>,
    pub position: Option<f64>,
    pub total_duration: Option<f64>,
    pub updated_at: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SaveProgressResponse {
    /// False when a record with a later `updated_at` was already stored
    pub applied: bool,
}

/// A stored record plus the values derived from it
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    #[serde(flatten)]
    pub record: ProgressRecord,
    pub is_completed: bool,
    pub percent_complete: u8,
}

impl From<ProgressRecord> for ProgressResponse {
    fn from(record: ProgressRecord) -> Self {
        Self {
            is_completed: record.is_completed(),
            percent_complete: record.percent_complete(),
            record,
        }
    }
}

/// PUT /api/progress/:owner_id/:content_item_id - Overwrite one record
///
/// Writes older than the stored record leave it untouched, so requests
/// arriving out of order cannot roll progress back.
pub async fn save_progress(
    State(app_state): State<AppState>,
    Path((owner_id, content_item_id)): Path<(String, String)>,
    Json(body): Json<SaveProgressBody>,
) -> Result<Json<SaveProgressResponse>> {
    let owner_id = parse_owner(owner_id)?;
    let content_item_id = ContentItemId::new(content_item_id);
    if content_item_id.as_str().is_empty() {
        return Err(ServerError::BadRequest(
            "content_item_id must not be empty".to_string(),
        ));
    }

    let record = ProgressRecord::new(
        owner_id,
        content_item_id,
        body.part_index.unwrap_or(0),
        body.position.unwrap_or(0.0),
        body.total_duration.unwrap_or(0.0),
        body.updated_at.unwrap_or_else(|| app_state.clock.now_millis()),
    );

    let status = vibe_storage::progress::upsert(app_state.pool(), &record).await?;

    tracing::debug!(
        owner_id = %record.owner_id,
        content_item_id = %record.content_item_id,
        updated_at = record.updated_at,
        ?status,
        "Saved progress"
    );

    Ok(Json(SaveProgressResponse {
        applied: status == PutStatus::Applied,
    }))
}

/// GET /api/progress/:owner_id - Every record stored for an owner
pub async fn list_progress(
    State(app_state): State<AppState>,
    Path(owner_id): Path<String>,
) -> Result<Json<Vec<ProgressResponse>>> {
    let owner_id = parse_owner(owner_id)?;

    let records = vibe_storage::progress::get_all(app_state.pool(), &owner_id).await?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}

fn parse_owner(owner_id: String) -> Result<OwnerId> {
    if owner_id.trim().is_empty() {
        return Err(ServerError::BadRequest(
            "owner_id must not be empty".to_string(),
        ));
    }
    Ok(OwnerId::new(owner_id))
}
