//! User repository

use std::collections::HashMap;

use sqlx::SqlitePool;
use uuid::Uuid;

use super::{
    items_from_rows, DbError, ItemRow, StockItemRepo, UserRow, ITEM_COLUMNS, USER_COLUMNS,
};
use crate::models::{GroceryItem, User};

/// User repository
pub struct UserRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user with their stock items loaded.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DbError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = StockItemRepo::new(self.pool).list_for_user(id).await?;
        Ok(Some(row.into_user(items)))
    }

    /// List all users, each with their stock items loaded.
    ///
    /// Two queries inside one read transaction: users, then every item,
    /// grouped by owner in memory.
    pub async fn list(&self) -> Result<Vec<User>, DbError> {
        let mut tx = self.pool.begin().await?;

        let users: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, rowid"
        ))
        .fetch_all(&mut *tx)
        .await?;

        let item_rows: Vec<ItemRow> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM stock_items ORDER BY created_at, rowid"
        ))
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let mut by_owner: HashMap<Uuid, Vec<GroceryItem>> = HashMap::new();
        for item in items_from_rows(item_rows)? {
            by_owner.entry(item.user_id).or_default().push(item);
        }

        Ok(users
            .into_iter()
            .map(|row| {
                let items = by_owner.remove(&row.id).unwrap_or_default();
                row.into_user(items)
            })
            .collect())
    }

    /// Whether a user with this id exists.
    pub async fn exists(&self, id: Uuid) -> Result<bool, DbError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
            .bind(id)
            .fetch_one(self.pool)
            .await?;
        Ok(exists)
    }
}
