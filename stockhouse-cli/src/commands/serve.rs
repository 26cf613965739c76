//! HTTP server command
//!
//! Runs the stockhouse API with the effective configuration.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use stockhouse_server::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to (overrides config/environment)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// SQLite database URL, e.g. sqlite://stockhouse.db (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

impl ServeArgs {
    /// Layer command line flags over a loaded configuration.
    pub fn apply(&self, config: &mut ServerConfig) {
        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if let Some(url) = &self.database_url {
            config.database_url = url.clone();
        }
        if let Some(max) = self.max_connections {
            config.max_connections = max;
        }
        if self.cors_permissive {
            config.cors_permissive = true;
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = ServerConfig::load(config_path).context("Failed to load configuration")?;
    args.apply(&mut config);

    if config.max_connections == 0 {
        anyhow::bail!("--max-connections must be at least 1");
    }

    tracing::info!(
        bind = %config.bind_addr,
        database = %config.database_url,
        "Starting stockhouse server"
    );

    // Blocks until shutdown
    run_server(config).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = ServeArgs {
            bind: Some("0.0.0.0:9999".parse().unwrap()),
            database_url: Some("sqlite::memory:".into()),
            max_connections: Some(2),
            cors_permissive: true,
        };
        let mut config = ServerConfig::default();
        args.apply(&mut config);

        assert_eq!(config.bind_addr.port(), 9999);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 2);
        assert!(config.cors_permissive);
    }

    #[test]
    fn absent_flags_keep_config() {
        let mut config = ServerConfig {
            cors_permissive: true,
            ..ServerConfig::default()
        };
        let before = config.clone();
        ServeArgs::default().apply(&mut config);
        assert_eq!(config, before);
    }
}
