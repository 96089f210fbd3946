// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as parseable cron expressions, plausible sender mailboxes, and the
//! gateway's token requirement.

use crate::diagnostic::ConfigError;
use crate::model::FinbellConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &FinbellConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate log_level is a recognized tracing level
    let level = config.service.log_level.trim();
    if !LOG_LEVELS.contains(&level) {
        errors.push(ConfigError::Validation {
            message: format!(
                "service.log_level must be one of trace, debug, info, warn, error; got `{level}`"
            ),
        });
    }

    // Validate database_path is not empty
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // Validate SMTP relay settings
    if config.smtp.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "smtp.host must not be empty".to_string(),
        });
    }

    if config.smtp.port == 0 {
        errors.push(ConfigError::Validation {
            message: "smtp.port must be non-zero".to_string(),
        });
    }

    // Light mailbox shape check; lettre does the real parse at startup
    let from = config.smtp.from.trim();
    if from.is_empty() || !from.contains('@') {
        errors.push(ConfigError::Validation {
            message: format!(
                "smtp.from `{from}` does not look like a mailbox (expected e.g. `Finbell <no-reply@example.com>`)"
            ),
        });
    }

    // Credentials must come as a pair
    if config.smtp.username.is_some() != config.smtp.password.is_some() {
        errors.push(ConfigError::Validation {
            message: "smtp.username and smtp.password must be set together".to_string(),
        });
    }

    // Validate the batch schedule is a parseable cron expression
    if let Err(e) = config.notifier.schedule.parse::<croner::Cron>() {
        errors.push(ConfigError::Validation {
            message: format!(
                "notifier.schedule `{}` is not a valid cron expression: {e}",
                config.notifier.schedule
            ),
        });
    }

    if config.notifier.currency_symbol.is_empty() {
        errors.push(ConfigError::Validation {
            message: "notifier.currency_symbol must not be empty".to_string(),
        });
    }

    // Gateway is fail-closed: enabling it without a token is a config error,
    // never an unauthenticated server
    if config.gateway.enabled {
        match &config.gateway.bearer_token {
            Some(token) if !token.trim().is_empty() => {}
            _ => errors.push(ConfigError::Validation {
                message: "gateway.bearer_token is required when gateway.enabled is true"
                    .to_string(),
            }),
        }

        if config.gateway.port == 0 {
            errors.push(ConfigError::Validation {
                message: "gateway.port must be non-zero".to_string(),
            });
        }
    }

    // Validate gateway host looks like a valid IP or hostname
    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("gateway.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
