//! HTTP request firewall.
//!
//! Inspects the query string, headers and POST body of every request for
//! Spring4Shell class-loader parameter paths and rejects matches with 403.

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod inspection;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::FirewallConfig;
pub use error::FirewallError;
pub use http::FirewallServer;
pub use inspection::{evaluate, Decision, Field};
pub use lifecycle::{Shutdown, ShutdownSignal};
