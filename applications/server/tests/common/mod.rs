/// Common test utilities and fixtures
use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;
use vibe_core::Clock;
use vibe_server::{create_router, state::AppState};

/// Server clock frozen at one instant
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

pub const SERVER_NOW: i64 = 1_700_000_000_000;

/// Router over a fresh SQLite file
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}", temp_dir.path().join("server.db").display());

        let pool = vibe_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");
        vibe_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(pool.clone()).with_clock(Arc::new(FixedClock(SERVER_NOW)));

        Self {
            router: create_router(state),
            pool,
            _temp_dir: temp_dir,
        }
    }
}
