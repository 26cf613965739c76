//! Table definitions, created on startup if missing

use sqlx::SqlitePool;

use super::DbError;

const STATEMENTS: [(&str, &str); 3] = [
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BLOB PRIMARY KEY NOT NULL,
            username TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            version INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        )
        "#,
    ),
    (
        "stock_items",
        r#"
        CREATE TABLE IF NOT EXISTS stock_items (
            id BLOB PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            quantity REAL NOT NULL,
            unity TEXT NOT NULL,
            description TEXT,
            user_id BLOB NOT NULL REFERENCES users(id),
            version INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        )
        "#,
    ),
    (
        "idx_stock_items_user_id",
        "CREATE INDEX IF NOT EXISTS idx_stock_items_user_id ON stock_items(user_id)",
    ),
];

/// Create the `users` and `stock_items` tables if they do not exist.
pub async fn ensure(pool: &SqlitePool) -> Result<(), DbError> {
    for (name, sql) in STATEMENTS {
        tracing::debug!(object = name, "ensuring schema object");
        sqlx::query(sql).execute(pool).await?;
    }

    tracing::info!("database schema ready");
    Ok(())
}
