//! Database layer - connection pool, schema, repositories, unit of work
//!
//! # Design Principles
//!
//! - Reads go through repositories that say upfront what they load
//! - List operations avoid N+1 queries
//! - Writes are staged in a [`UnitOfWork`] and committed by `persist`
//! - Updates and deletes match on row version; a miss is a conflict

pub mod pool;
pub mod repos;
pub mod schema;
pub mod unit_of_work;

pub use pool::{create_in_memory_pool, create_pool, create_pool_with_options, is_available};
pub use repos::{DbError, StockItemRepo, UserRepo};
pub use unit_of_work::{Record, UnitOfWork};
