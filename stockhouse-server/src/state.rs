//! Application state shared across handlers

use sqlx::SqlitePool;

/// Shared application state. The pool is itself a cheap, clonable handle.
#[derive(Clone)]
pub struct AppState {
    pool: SqlitePool,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
