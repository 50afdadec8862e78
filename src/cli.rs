//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{load_config, validate_config, ConfigError, FirewallConfig};

#[derive(Debug, Parser)]
#[command(name = "request-firewall")]
#[command(version, about = "HTTP firewall that blocks Spring4Shell class-loader payloads", long_about = None)]
pub struct Cli {
    /// Port to listen on (overrides listener.port)
    pub port: Option<u16>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (overrides logging.level)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Load the configuration file, if any, and apply command-line overrides.
    pub fn resolve_config(&self) -> Result<FirewallConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => FirewallConfig::default(),
        };

        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}
