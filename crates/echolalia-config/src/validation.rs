// SPDX-FileCopyrightText: 2026 Echolalia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks the constraints serde cannot express: required connection keys,
//! a positive bulk size, and a known log level.

use crate::diagnostic::ConfigError;
use crate::model::EcholaliaConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns all collected validation errors (does not fail fast).
pub fn validate_config(config: &EcholaliaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let couchdb = &config.couchdb;

    match couchdb.host.as_deref().map(str::trim) {
        None => errors.push(ConfigError::MissingKey {
            key: "couchdb.host".into(),
        }),
        Some("") => errors.push(ConfigError::Validation {
            message: "couchdb.host must not be empty".into(),
        }),
        Some(_) => {}
    }

    if couchdb.port.is_none() {
        errors.push(ConfigError::MissingKey {
            key: "couchdb.port".into(),
        });
    }

    if let Some(size) = couchdb.bulk_size
        && size < 1
    {
        errors.push(ConfigError::Validation {
            message: format!("couchdb.bulk_size has to exceed 0, got {size}"),
        });
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
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

    fn valid_config() -> EcholaliaConfig {
        let mut config = EcholaliaConfig::default();
        config.couchdb.host = Some("localhost".into());
        config.couchdb.port = Some(5984);
        config
    }

    #[test]
    fn host_and_port_are_enough() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn default_config_is_missing_host_and_port() {
        let errors = validate_config(&EcholaliaConfig::default()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::MissingKey { key } if key == "couchdb.host")));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::MissingKey { key } if key == "couchdb.port")));
    }

    #[test]
    fn blank_host_fails_validation() {
        let mut config = valid_config();
        config.couchdb.host = Some("  ".into());
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(&errors[0], ConfigError::Validation { message } if message.contains("host")));
    }

    #[test]
    fn zero_and_negative_bulk_size_fail_validation() {
        for size in [0, -3] {
            let mut config = valid_config();
            config.couchdb.bulk_size = Some(size);
            let errors = validate_config(&config).unwrap_err();
            assert!(errors.iter().any(
                |e| matches!(e, ConfigError::Validation { message } if message.contains("bulk_size"))
            ));
        }
    }

    #[test]
    fn bulk_size_of_one_is_valid() {
        let mut config = valid_config();
        config.couchdb.bulk_size = Some(1);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = valid_config();
        config.logging.level = "chatty".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn lone_user_is_not_an_error() {
        let mut config = valid_config();
        config.couchdb.user = Some("admin".into());
        assert!(validate_config(&config).is_ok());
    }
}
