//! User entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::GroceryItem;

/// A stored user.
///
/// `stock_items` is only populated by repository methods that say so
/// (e.g. [`crate::db::UserRepo::find_by_id`]); otherwise it is empty.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Argon2 PHC string, never the plaintext password
    pub password_hash: String,
    pub stock_items: Vec<GroceryItem>,
    /// Row version for optimistic concurrency
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// A fresh, not yet persisted user with a generated id.
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            stock_items: Vec::new(),
            version: 1,
            created_at: Utc::now(),
        }
    }
}
