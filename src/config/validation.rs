//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, poll interval > 0)
//! - Validate addresses and colour tokens
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("theme.colors.{token}: '{value}' is not a #rrggbb colour")]
    InvalidColor { token: String, value: String },

    #[error("observability.log_level: unknown level '{0}'")]
    UnknownLogLevel(String),
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "server.bind_address",
            value: config.server.bind_address.clone(),
        });
    }

    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "server.request_timeout_secs",
        });
    }

    if config.server.use_polling && config.server.poll_interval_ms == 0 {
        errors.push(ValidationError::Zero {
            field: "server.poll_interval_ms",
        });
    }

    for (name, scale) in config.theme.colors.scales() {
        for (shade, value) in [
            ("light", &scale.light),
            ("default", &scale.default),
            ("dark", &scale.dark),
        ] {
            if !is_hex_color(value) {
                errors.push(ValidationError::InvalidColor {
                    token: format!("{}.{}", name, shade),
                    value: value.clone(),
                });
            }
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();
        config.server.bind_address = "not an address".into();
        config.server.request_timeout_secs = 0;
        config.theme.colors.primary.dark = "blue".into();
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::InvalidColor {
            token: "primary.dark".into(),
            value: "blue".into(),
        }));
        assert!(errors.contains(&ValidationError::UnknownLogLevel("loud".into())));
    }

    #[test]
    fn test_poll_interval_only_checked_when_polling() {
        let mut config = AppConfig::default();
        config.server.poll_interval_ms = 0;
        assert!(validate_config(&config).is_err());

        config.server.use_polling = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#3659E3"));
        assert!(is_hex_color("#ff6b3d"));
        assert!(!is_hex_color("3659E3"));
        assert!(!is_hex_color("#3659E"));
        assert!(!is_hex_color("#3659EG"));
    }
}
