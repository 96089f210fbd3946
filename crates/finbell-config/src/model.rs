// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Finbell notification service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Finbell configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FinbellConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Outbound SMTP settings.
    #[serde(default)]
    pub smtp: SmtpConfig,

    /// Batch schedule and rendering settings.
    #[serde(default)]
    pub notifier: NotifierConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Internal service name, used for log filtering.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Human-facing application name shown in email banners.
    #[serde(default = "default_display_name")]
    pub display_name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            display_name: default_display_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_service_name() -> String {
    "finbell".to_string()
}

fn default_display_name() -> String {
    "Finbell".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("finbell").join("finbell.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("finbell.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Outbound SMTP configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SmtpConfig {
    /// SMTP relay hostname.
    #[serde(default = "default_smtp_host")]
    pub host: String,

    /// SMTP relay port.
    #[serde(default = "default_smtp_port")]
    pub port: u16,

    /// SMTP username. `None` disables authentication.
    #[serde(default)]
    pub username: Option<String>,

    /// SMTP password. Must be set together with `username`.
    #[serde(default)]
    pub password: Option<String>,

    /// Sender mailbox, e.g. `"Finbell <no-reply@example.com>"`.
    #[serde(default = "default_smtp_from")]
    pub from: String,

    /// Upgrade the connection with STARTTLS. When false, connects in
    /// plaintext (local relays and test servers only).
    #[serde(default = "default_smtp_starttls")]
    pub starttls: bool,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: None,
            password: None,
            from: default_smtp_from(),
            starttls: default_smtp_starttls(),
        }
    }
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_smtp_from() -> String {
    "Finbell <no-reply@finbell.local>".to_string()
}

fn default_smtp_starttls() -> bool {
    true
}

/// Batch schedule and rendering configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NotifierConfig {
    /// Cron expression for the daily batch run (5-field, local time).
    #[serde(default = "default_schedule")]
    pub schedule: String,

    /// Currency symbol prefixed to amounts in rendered emails.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            schedule: default_schedule(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

fn default_schedule() -> String {
    "0 8 * * *".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

/// HTTP gateway configuration.
///
/// The gateway is opt-in. When enabled, a bearer token is required; the
/// server refuses to start without one rather than serving unauthenticated.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Enable the HTTP gateway.
    #[serde(default = "default_gateway_enabled")]
    pub enabled: bool,

    /// Address to bind the gateway to.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind the gateway to.
    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// Bearer token for the authenticated routes. Required when enabled.
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            enabled: default_gateway_enabled(),
            host: default_gateway_host(),
            port: default_gateway_port(),
            bearer_token: None,
        }
    }
}

fn default_gateway_enabled() -> bool {
    false
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    8743
}
