//! stockhouse-server: HTTP API for users and their grocery stock
//!
//! Users own stock items (name, quantity, unit of measure). Everything is
//! persisted in SQLite and exposed as a small JSON REST surface.

pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod http;
pub mod mapper;
pub mod models;
pub mod password;
pub mod state;

pub use config::ServerConfig;
pub use error::{Error, Result};
pub use http::{router, run_server};
pub use state::AppState;
