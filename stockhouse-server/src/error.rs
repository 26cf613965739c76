//! Error types for stockhouse-server startup and configuration

use std::path::PathBuf;

use thiserror::Error;

use crate::db::DbError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Database connection failed: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("Invalid config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid config value for {key}: {reason}")]
    ConfigValue { key: &'static str, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn config_value(key: &'static str, reason: impl Into<String>) -> Self {
        Self::ConfigValue {
            key,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_value_display() {
        let err = Error::config_value("bind_addr", "not an address");
        assert_eq!(
            err.to_string(),
            "Invalid config value for bind_addr: not an address"
        );
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
