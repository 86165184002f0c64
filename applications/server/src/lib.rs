//! Vibe Server Library
//!
//! Shared progress store for every device of an owner: overwrite one record,
//! list an owner's records, health check.
//!
//! This library exposes the router and its parts for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

use axum::Router;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use state::AppState;

/// Build the full application: `/api` routes plus tracing and CORS layers
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api::routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
