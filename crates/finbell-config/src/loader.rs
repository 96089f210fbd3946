// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading via Figment.
//!
//! Three TOML layers are merged over the compiled defaults, then `FINBELL_`
//! environment variables override everything.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::FinbellConfig;

/// Config sections, used to turn `FINBELL_SECTION_KEY` into `section.key`.
const SECTIONS: [&str; 5] = ["service", "storage", "smtp", "notifier", "gateway"];

/// The config file layers, lowest precedence first: system-wide, then the
/// user's XDG config dir, then the working directory.
pub(crate) fn layer_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/finbell/finbell.toml")];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("finbell/finbell.toml"));
    }
    paths.push(PathBuf::from("finbell.toml"));
    paths
}

/// Load configuration from the standard layers with env var overrides.
///
/// Missing files are skipped silently; a present but malformed file is an
/// error.
pub fn load_config() -> Result<FinbellConfig, figment::Error> {
    let mut figment = Figment::from(Serialized::defaults(FinbellConfig::default()));
    for path in layer_paths() {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(env_provider()).extract()
}

/// Load configuration from a TOML string only (no file layers, no env vars).
pub fn load_config_from_str(toml: &str) -> Result<FinbellConfig, figment::Error> {
    Figment::from(Serialized::defaults(FinbellConfig::default()))
        .merge(Toml::string(toml))
        .extract()
}

/// Load configuration from one explicit file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<FinbellConfig, figment::Error> {
    Figment::from(Serialized::defaults(FinbellConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Environment provider mapping `FINBELL_SECTION_KEY` to `section.key`.
///
/// Splits on the section name rather than on every underscore, so keys
/// that themselves contain underscores survive: `FINBELL_GATEWAY_BEARER_TOKEN`
/// must become `gateway.bearer_token`, not `gateway.bearer.token`.
fn env_provider() -> Env {
    Env::prefixed("FINBELL_").map(|key| {
        // Keys arrive lowercased with the prefix already stripped, e.g.
        // FINBELL_GATEWAY_BEARER_TOKEN -> "gateway_bearer_token".
        let key = key.as_str();
        for section in SECTIONS {
            if let Some(rest) = key.strip_prefix(section) {
                if let Some(field) = rest.strip_prefix('_') {
                    return format!("{section}.{field}").into();
                }
            }
        }
        key.to_owned().into()
    })
}
