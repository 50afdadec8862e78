//! Top-level error type for starting and running the firewall.

use std::net::{AddrParseError, SocketAddr};

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum FirewallError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid listen address: {0}")]
    Address(#[from] AddrParseError),

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}
