/// API route modules
pub mod health;
pub mod progress;

use crate::state::AppState;
use axum::{
    routing::{get, put},
    Router,
};

/// Routes mounted under `/api`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/progress/:owner_id", get(progress::list_progress))
        .route(
            "/progress/:owner_id/:content_item_id",
            put(progress::save_progress),
        )
}
