//! Stock item repository
//!
//! Every lookup is scoped to the owning user.

use sqlx::SqlitePool;
use uuid::Uuid;

use super::{items_from_rows, DbError, ItemRow, ITEM_COLUMNS};
use crate::models::GroceryItem;

/// Stock item repository
pub struct StockItemRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> StockItemRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get an item, but only if `owner` owns it.
    pub async fn find_by_id(
        &self,
        id: Uuid,
        owner: Uuid,
    ) -> Result<Option<GroceryItem>, DbError> {
        let row: Option<ItemRow> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM stock_items WHERE id = ? AND user_id = ?"
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(self.pool)
        .await?;

        row.map(GroceryItem::try_from).transpose()
    }

    /// Whether `owner` owns an item with this id.
    pub async fn exists(&self, id: Uuid, owner: Uuid) -> Result<bool, DbError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM stock_items WHERE id = ? AND user_id = ?)",
        )
        .bind(id)
        .bind(owner)
        .fetch_one(self.pool)
        .await?;
        Ok(exists)
    }

    /// All items owned by `owner`, oldest first.
    pub async fn list_for_user(&self, owner: Uuid) -> Result<Vec<GroceryItem>, DbError> {
        let rows: Vec<ItemRow> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM stock_items WHERE user_id = ? ORDER BY created_at, rowid"
        ))
        .bind(owner)
        .fetch_all(self.pool)
        .await?;

        items_from_rows(rows)
    }
}
