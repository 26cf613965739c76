//! Storage entities
//!
//! These are the shapes the store reads and writes. They never cross the
//! HTTP boundary directly; see [`crate::dto`] and [`crate::mapper`].

pub mod grocery_item;
pub mod unity;
pub mod user;

pub use grocery_item::GroceryItem;
pub use unity::{Unity, UnknownUnity};
pub use user::User;
