//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → FirewallConfig (validated, immutable)
//!     → CLI overrides applied in cli.rs, then re-validated
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults to allow minimal configs
//! - The blocked pattern table is not configurable

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{FirewallConfig, LimitsConfig, ListenerConfig, LogFormat, LoggingConfig};
pub use validation::{validate_config, ValidationError};
