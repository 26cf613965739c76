//! Database connection pool management
//!
//! Uses sqlx SqlitePool with explicit connection limits.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Create a SQLite connection pool.
///
/// The database file (and its parent directory) is created if missing.
/// Foreign keys are enforced on every connection.
///
/// # Errors
///
/// Returns an error if the URL is invalid or the connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("sqlite://stockhouse.db").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a SQLite connection pool with custom options.
///
/// In-memory URLs (`sqlite::memory:`, `mode=memory`) get the same single
/// pinned connection as [`create_in_memory_pool`], whatever
/// `max_connections` says.
///
/// # Arguments
///
/// * `database_url` - SQLite connection string
/// * `max_connections` - Maximum number of connections in the pool
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.foreign_keys(true);

    if is_in_memory(database_url) {
        tracing::debug!("in-memory database, pinning pool to one connection");
        return pinned_pool(options).await;
    }

    let options = options.create_if_missing(true);
    if let Some(parent) = options
        .get_filename()
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
    }

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Create a pool over a private in-memory database.
pub async fn create_in_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    pinned_pool(options).await
}

// An in-memory database lives only as long as its connections, so the pool
// keeps exactly one and never recycles it.
async fn pinned_pool(options: SqliteConnectOptions) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Whether the pool can hand out a connection right now.
pub async fn is_available(pool: &SqlitePool) -> bool {
    match pool.acquire().await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "database unavailable");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_pool_acquires_connection() {
        let pool = create_in_memory_pool().await.expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
        assert!(is_available(&pool).await);
    }

    #[tokio::test]
    async fn file_pool_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("stockhouse.db");
        let url = format!("sqlite://{}", path.display());

        let pool = create_pool(&url).await.expect("pool creation failed");
        assert!(is_available(&pool).await);
        assert!(path.exists());
    }

    #[test]
    fn detects_in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file:shared?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://stockhouse.db"));
    }

    #[tokio::test]
    async fn in_memory_url_is_pinned_to_one_connection() {
        let pool = create_pool_with_options("sqlite::memory:", 5)
            .await
            .expect("pool creation failed");
        crate::db::schema::ensure(&pool).await.unwrap();

        let count = || {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users").fetch_one(&pool)
        };
        let (a, b, c) = tokio::join!(count(), count(), count());
        assert_eq!((a.unwrap(), b.unwrap(), c.unwrap()), (0, 0, 0));
        assert_eq!(pool.size(), 1);
    }

    #[tokio::test]
    async fn closed_pool_is_unavailable() {
        let pool = create_in_memory_pool().await.unwrap();
        pool.close().await;
        assert!(!is_available(&pool).await);
    }
}
