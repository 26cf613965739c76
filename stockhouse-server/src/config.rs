//! Server configuration
//!
//! Precedence, lowest to highest: built-in defaults, TOML file, environment,
//! then whatever the caller (usually the CLI) sets afterwards.
//!
//! Environment variables:
//!   STOCKHOUSE_BIND_ADDR   # e.g. 0.0.0.0:8080
//!   DATABASE_URL           # e.g. sqlite:///var/lib/stockhouse/stockhouse.db

use std::fs;
use std::net::{AddrParseError, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::db::pool::DEFAULT_MAX_CONNECTIONS;
use crate::{Error, Result};

pub const ENV_BIND_ADDR: &str = "STOCKHOUSE_BIND_ADDR";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3030)
    pub bind_addr: SocketAddr,

    /// SQLite connection string
    pub database_url: String,

    /// Maximum pooled database connections
    pub max_connections: u32,

    /// Requests running longer than this are answered with 408
    pub request_timeout_secs: u64,

    /// Allow permissive CORS (default: false = localhost only)
    ///
    /// WARNING: Setting this to true allows any origin.
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3030)),
            database_url: default_database_url(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            request_timeout_secs: 30,
            cors_permissive: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `path`, or from the default location if it
    /// exists, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Config file path: ~/.stockhouse/config.toml
    pub fn config_path() -> PathBuf {
        stockhouse_home().join("config.toml")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from an environment-like lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup(ENV_BIND_ADDR) {
            self.bind_addr = addr
                .parse()
                .map_err(|e: AddrParseError| Error::config_value(ENV_BIND_ADDR, e.to_string()))?;
        }

        if let Some(url) = lookup(ENV_DATABASE_URL).filter(|url| !url.is_empty()) {
            self.database_url = url;
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn stockhouse_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".stockhouse")
}

fn default_database_url() -> String {
    format!("sqlite://{}", stockhouse_home().join("stockhouse.db").display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 3030);
        assert!(!config.cors_permissive);
        assert!(config.database_url.starts_with("sqlite://"));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "bind_addr = \"0.0.0.0:8080\"\nmax_connections = 2\n").unwrap();

        let config = ServerConfig::from_file(&path).unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.max_connections, 2);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn bad_toml_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "bind_addr = [").unwrap();

        let err = ServerConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_BIND_ADDR, "10.0.0.1:9000"),
            (ENV_DATABASE_URL, "sqlite::memory:"),
        ]);
        let mut config = ServerConfig::default();
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.bind_addr, "10.0.0.1:9000".parse().unwrap());
        assert_eq!(config.database_url, "sqlite::memory:");
    }

    #[test]
    fn invalid_env_bind_addr_is_rejected() {
        let mut config = ServerConfig::default();
        let err = config
            .apply_env(|key| (key == ENV_BIND_ADDR).then(|| "nope".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::ConfigValue { key: ENV_BIND_ADDR, .. }));
    }

    #[test]
    fn round_trips_through_toml() {
        let config = ServerConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: ServerConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
