//! Read-side repositories
//!
//! Each repository follows these patterns:
//! - Lookups return `Option`; absence is not an error at this layer
//! - Methods name what they eager-load
//! - List operations run a fixed number of queries (no N+1)

pub mod stock_items;
pub mod users;

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::{GroceryItem, User};

pub use stock_items::StockItemRepo;
pub use users::UserRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("conflict: {resource} '{id}' was modified concurrently")]
    Conflict { resource: &'static str, id: String },

    #[error("corrupt row in {table}: {reason}")]
    Corrupt { table: &'static str, reason: String },
}

impl DbError {
    /// The store could not hand out a connection at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            DbError::Sqlx(sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_))
        )
    }
}

pub(crate) const USER_COLUMNS: &str = "id, username, password_hash, version, created_at";

pub(crate) const ITEM_COLUMNS: &str =
    "id, name, quantity, unity, description, user_id, version, created_at";

#[derive(Debug, FromRow)]
pub(crate) struct UserRow {
    id: Uuid,
    username: String,
    password_hash: String,
    version: i64,
    created_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_user(self, stock_items: Vec<GroceryItem>) -> User {
        User {
            id: self.id,
            username: self.username,
            password_hash: self.password_hash,
            stock_items,
            version: self.version,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct ItemRow {
    id: Uuid,
    name: String,
    quantity: f64,
    unity: String,
    description: Option<String>,
    user_id: Uuid,
    version: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<ItemRow> for GroceryItem {
    type Error = DbError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let unity = row.unity.parse().map_err(|e: crate::models::UnknownUnity| {
            DbError::Corrupt {
                table: "stock_items",
                reason: e.to_string(),
            }
        })?;

        Ok(GroceryItem {
            id: row.id,
            name: row.name,
            quantity: row.quantity,
            unity,
            description: row.description,
            user_id: row.user_id,
            version: row.version,
            created_at: row.created_at,
        })
    }
}

pub(crate) fn items_from_rows(rows: Vec<ItemRow>) -> Result<Vec<GroceryItem>, DbError> {
    rows.into_iter().map(GroceryItem::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_errors_are_unavailable() {
        assert!(DbError::Sqlx(sqlx::Error::PoolTimedOut).is_unavailable());
        assert!(DbError::Sqlx(sqlx::Error::PoolClosed).is_unavailable());
        assert!(!DbError::Sqlx(sqlx::Error::RowNotFound).is_unavailable());
        assert!(!DbError::Conflict {
            resource: "user",
            id: "x".into()
        }
        .is_unavailable());
    }

    #[test]
    fn unknown_unity_is_corrupt() {
        let row = ItemRow {
            id: Uuid::new_v4(),
            name: "Milk".into(),
            quantity: 1.0,
            unity: "Barrel".into(),
            description: None,
            user_id: Uuid::new_v4(),
            version: 1,
            created_at: Utc::now(),
        };
        let err = GroceryItem::try_from(row).unwrap_err();
        assert!(matches!(err, DbError::Corrupt { table: "stock_items", .. }));
    }
}
