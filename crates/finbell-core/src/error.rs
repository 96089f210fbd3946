// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the finbell notification service.

use thiserror::Error;

/// The primary error type used across all finbell collaborator traits and
/// core operations.
#[derive(Debug, Error)]
pub enum FinbellError {
    /// Configuration errors (invalid TOML, bad cron expression, missing values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, migration).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Mail delivery errors (transport setup, address parsing, SMTP rejection).
    #[error("mail error: {message}")]
    Mail {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Scheduler errors (unparseable cron expression, no next occurrence).
    #[error("schedule error: {0}")]
    Schedule(String),

    /// HTTP gateway errors (bind failure, server error, missing auth).
    #[error("gateway error: {message}")]
    Gateway {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}
