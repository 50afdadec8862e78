//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges. All problems are
//! reported together rather than stopping at the first.

use thiserror::Error;

use crate::config::schema::FirewallConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.host `{0}` is not an IP address")]
    InvalidHost(String),

    #[error("limits.max_body_size must be greater than zero")]
    ZeroBodySize,

    #[error("limits.request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("logging.level `{0}` is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Check a configuration, returning every problem found.
pub fn validate_config(config: &FirewallConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.socket_addr().is_err() {
        errors.push(ValidationError::InvalidHost(config.listener.host.clone()));
    }

    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodySize);
    }

    if config.limits.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.logging.level.parse::<tracing::Level>().is_err() {
        errors.push(ValidationError::InvalidLogLevel(config.logging.level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&FirewallConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = FirewallConfig::default();
        config.listener.host = "not-an-ip".into();
        config.limits.max_body_size = 0;
        config.limits.request_timeout_secs = 0;
        config.logging.level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidHost("not-an-ip".into()),
                ValidationError::ZeroBodySize,
                ValidationError::ZeroTimeout,
                ValidationError::InvalidLogLevel("loud".into()),
            ]
        );
    }

    #[test]
    fn test_log_level_case_insensitive() {
        let mut config = FirewallConfig::default();
        config.logging.level = "DEBUG".into();
        assert!(validate_config(&config).is_ok());
    }
}
