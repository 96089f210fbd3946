// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the Finbell notification service.
//!
//! Settings come from layered TOML files plus `FINBELL_` environment
//! variables, deserialized strictly (`deny_unknown_fields`) and then
//! validated semantically. Failures render as miette reports with source
//! spans and typo suggestions.
//!
//! ```no_run
//! let config = match finbell_config::load_and_validate() {
//!     Ok(config) => config,
//!     Err(errors) => {
//!         finbell_config::render_errors(&errors);
//!         std::process::exit(1);
//!     }
//! };
//! println!("batch runs at {}", config.notifier.schedule);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::FinbellConfig;

/// Load configuration from the standard layers and validate it.
///
/// Figment errors are converted to diagnostics with spans into whichever
/// config file supplied the offending key; a config that deserializes but
/// fails a semantic check yields validation errors instead. All errors
/// are collected, not just the first.
pub fn load_and_validate() -> Result<FinbellConfig, Vec<ConfigError>> {
    let config = loader::load_config()
        .map_err(|e| diagnostic::diagnose(e, &read_layer_sources()))?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml: &str) -> Result<FinbellConfig, Vec<ConfigError>> {
    let config = loader::load_config_from_str(toml).map_err(|e| {
        let sources = vec![("<inline>".to_string(), toml.to_string())];
        diagnostic::diagnose(e, &sources)
    })?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Contents of whichever config layers exist on disk, keyed by the same
/// path strings figment reports in its error metadata.
fn read_layer_sources() -> Vec<(String, String)> {
    loader::layer_paths()
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            Some((path.display().to_string(), content))
        })
        .collect()
}
