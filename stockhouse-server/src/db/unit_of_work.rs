//! Write side: staged inserts, updates and deletes committed together
//!
//! Updates and deletes carry the row version the caller read. If the row has
//! moved on (or vanished) the write touches nothing and the unit remembers a
//! conflict; `persist` then rolls everything back and reports it.

use async_trait::async_trait;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use uuid::Uuid;

use super::DbError;
use crate::models::{GroceryItem, User};

/// An entity the unit of work knows how to write.
#[async_trait]
pub trait Record: Send + Sync {
    /// Resource name used in errors and logs
    const RESOURCE: &'static str;

    fn id(&self) -> Uuid;
    fn version(&self) -> i64;
    fn set_version(&mut self, version: i64);

    async fn insert(&self, conn: &mut SqliteConnection) -> Result<(), sqlx::Error>;

    /// Returns affected rows; zero when `version()` no longer matches.
    async fn update(&self, conn: &mut SqliteConnection) -> Result<u64, sqlx::Error>;

    /// Returns affected rows; zero when `version()` no longer matches.
    async fn delete(&self, conn: &mut SqliteConnection) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl Record for User {
    const RESOURCE: &'static str = "user";

    fn id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }

    async fn insert(&self, conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO users (id, username, password_hash, version, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(self.id)
        .bind(&self.username)
        .bind(&self.password_hash)
        .bind(self.version)
        .bind(self.created_at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn update(&self, conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET username = ?, password_hash = ?, version = version + 1
             WHERE id = ? AND version = ?",
        )
        .bind(&self.username)
        .bind(&self.password_hash)
        .bind(self.id)
        .bind(self.version)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = ? AND version = ?")
            .bind(self.id)
            .bind(self.version)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl Record for GroceryItem {
    const RESOURCE: &'static str = "stock item";

    fn id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }

    async fn insert(&self, conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO stock_items
                (id, name, quantity, unity, description, user_id, version, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(self.id)
        .bind(&self.name)
        .bind(self.quantity)
        .bind(self.unity.as_str())
        .bind(self.description.as_deref())
        .bind(self.user_id)
        .bind(self.version)
        .bind(self.created_at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn update(&self, conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE stock_items
             SET name = ?, quantity = ?, unity = ?, description = ?, version = version + 1
             WHERE id = ? AND user_id = ? AND version = ?",
        )
        .bind(&self.name)
        .bind(self.quantity)
        .bind(self.unity.as_str())
        .bind(self.description.as_deref())
        .bind(self.id)
        .bind(self.user_id)
        .bind(self.version)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM stock_items WHERE id = ? AND user_id = ? AND version = ?")
                .bind(self.id)
                .bind(self.user_id)
                .bind(self.version)
                .execute(&mut *conn)
                .await?;
        Ok(result.rows_affected())
    }
}

/// Pending writes inside one transaction.
///
/// Dropping a unit without calling [`UnitOfWork::persist`] rolls it back.
pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
    conflict: Option<DbError>,
}

impl UnitOfWork {
    pub async fn begin(pool: &SqlitePool) -> Result<Self, DbError> {
        Ok(Self {
            tx: pool.begin().await?,
            conflict: None,
        })
    }

    pub async fn insert<R: Record>(&mut self, record: &R) -> Result<(), DbError> {
        record.insert(&mut *self.tx).await?;
        Ok(())
    }

    /// Write `record` back. On success its version is bumped to match the row.
    pub async fn update<R: Record>(&mut self, record: &mut R) -> Result<(), DbError> {
        let affected = record.update(&mut *self.tx).await?;
        if affected == 0 {
            self.note_conflict::<R>(record.id());
        } else {
            record.set_version(record.version() + 1);
        }
        Ok(())
    }

    pub async fn delete<R: Record>(&mut self, record: &R) -> Result<(), DbError> {
        let affected = record.delete(&mut *self.tx).await?;
        if affected == 0 {
            self.note_conflict::<R>(record.id());
        }
        Ok(())
    }

    /// Commit all staged writes, or roll back and return the first conflict.
    pub async fn persist(self) -> Result<(), DbError> {
        let Self { tx, conflict } = self;

        if let Some(conflict) = conflict {
            tracing::warn!(error = %conflict, "rolling back unit of work");
            tx.rollback().await?;
            return Err(conflict);
        }

        tx.commit().await?;
        Ok(())
    }

    fn note_conflict<R: Record>(&mut self, id: Uuid) {
        if self.conflict.is_none() {
            self.conflict = Some(DbError::Conflict {
                resource: R::RESOURCE,
                id: id.to_string(),
            });
        }
    }
}
