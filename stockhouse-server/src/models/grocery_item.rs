//! Grocery stock item entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::Unity;

/// A stored stock item. Always owned by exactly one user.
#[derive(Debug, Clone, PartialEq)]
pub struct GroceryItem {
    pub id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub unity: Unity,
    pub description: Option<String>,
    pub user_id: Uuid,
    /// Row version for optimistic concurrency
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

impl GroceryItem {
    /// A fresh, not yet persisted item owned by `user_id`.
    pub fn new(
        user_id: Uuid,
        name: String,
        quantity: f64,
        unity: Unity,
        description: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            quantity,
            unity,
            description,
            user_id,
            version: 1,
            created_at: Utc::now(),
        }
    }
}
