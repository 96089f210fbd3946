// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rich configuration diagnostics.
//!
//! Figment reports deserialization problems as flat strings; this module
//! lifts them into miette reports. An unknown key gets a source span into
//! the TOML file it came from and a "did you mean" suggestion computed
//! with Jaro-Winkler similarity against the section's valid keys.

#![allow(unused_assignments)] // miette's Diagnostic derive trips this lint

use miette::{Diagnostic, GraphicalReportHandler, NamedSource, SourceSpan};
use thiserror::Error;

/// Similarity floor below which no suggestion is offered. Tuned so that
/// transposition typos (`hsot`, `scheduel`) clear it and garbage does not.
const MIN_SIMILARITY: f64 = 0.75;

/// A configuration error, renderable as a miette report.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key that no section of `FinbellConfig` declares.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(code(finbell::config::unknown_key), help("{hint}"))]
    UnknownKey {
        key: String,
        /// Precomputed help line: suggestion (if any) plus the valid keys.
        hint: String,
        #[label("not a recognized key")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value of the wrong TOML type, e.g. a string where a port number
    /// belongs.
    #[error("invalid type for `{key}`: found {actual}")]
    #[diagnostic(code(finbell::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        actual: String,
        expected: String,
    },

    /// A required key with no value in any layer.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(finbell::config::missing_key),
        help("set `{key}` in finbell.toml or via the matching FINBELL_ variable")
    )]
    MissingKey { key: String },

    /// A value that deserialized fine but fails a semantic check.
    #[error("validation error: {message}")]
    #[diagnostic(code(finbell::config::validation))]
    Validation { message: String },

    /// Anything figment reports that has no richer mapping.
    #[error("configuration error: {0}")]
    #[diagnostic(code(finbell::config::other))]
    Other(String),
}

/// Convert every entry of a figment error into a [`ConfigError`].
///
/// `sources` pairs each config file path with its content, so unknown-key
/// errors can be annotated with a span into the file they came from. An
/// empty slice degrades to spanless diagnostics.
pub fn diagnose(err: figment::Error, sources: &[(String, String)]) -> Vec<ConfigError> {
    err.into_iter().map(|e| diagnose_one(e, sources)).collect()
}

fn diagnose_one(error: figment::Error, sources: &[(String, String)]) -> ConfigError {
    use figment::error::Kind;

    match &error.kind {
        Kind::UnknownField(field, expected) => {
            let keys = expected.join(", ");
            let hint = match closest_key(field, expected) {
                Some(best) => format!("did you mean `{best}`? valid keys: {keys}"),
                None => format!("valid keys: {keys}"),
            };
            let (span, src) = locate(&error, field, sources).unzip();
            ConfigError::UnknownKey {
                key: field.clone(),
                hint,
                span,
                src,
            }
        }
        Kind::MissingField(field) => ConfigError::MissingKey {
            key: field.clone().into_owned(),
        },
        Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
            key: dotted_path(&error),
            actual: actual.to_string(),
            expected: expected.clone(),
        },
        _ => ConfigError::Other(error.to_string()),
    }
}

/// The error's position in the config tree as a `section.key` path.
fn dotted_path(error: &figment::Error) -> String {
    error
        .path
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

/// Resolve an unknown key to a span inside the file figment read it from.
///
/// Needs the error metadata to name a file that appears in `sources`;
/// string-based providers and env vars have no file to point into.
fn locate(
    error: &figment::Error,
    field: &str,
    sources: &[(String, String)],
) -> Option<(SourceSpan, NamedSource<String>)> {
    let source = error.metadata.as_ref().and_then(|m| m.source.as_ref())?;
    let figment::Source::File(path) = source else {
        return None;
    };
    let path = path.display().to_string();
    let (name, content) = sources.iter().find(|(candidate, _)| *candidate == path)?;

    let section: Vec<String> = error.path.iter().map(ToString::to_string).collect();
    let offset = key_offset(content, &section, field)?;
    Some((
        SourceSpan::new(offset.into(), field.len()),
        NamedSource::new(name, content.clone()),
    ))
}

/// Byte offset of `field` within `content`, scoped to the `[section]`
/// header that `path` names. Top-level keys scan from the start of the
/// file. The match must sit at the start of a line and be followed by
/// `=` or whitespace, so substrings of longer keys do not count.
fn key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let start = match path.first() {
        None => 0,
        Some(section) => {
            let header = format!("[{section}]");
            content.find(&header)? + header.len()
        }
    };

    content[start..]
        .match_indices(field)
        .map(|(rel, _)| start + rel)
        .find(|&at| {
            let line_start = content[..at].rfind('\n').map_or(0, |nl| nl + 1);
            let lead_ok = content[line_start..at].chars().all(char::is_whitespace);
            let tail_ok = content[at + field.len()..]
                .chars()
                .next()
                .is_some_and(|c| c == '=' || c == ' ' || c == '\t');
            lead_ok && tail_ok
        })
}

/// Best fuzzy match for `unknown` among `valid`, or `None` when nothing
/// clears [`MIN_SIMILARITY`].
pub fn closest_key(unknown: &str, valid: &[&str]) -> Option<String> {
    valid
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > MIN_SIMILARITY)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Render diagnostics to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut out = String::new();
        match handler.render_report(&mut out, error) {
            Ok(()) => eprint!("{out}"),
            Err(_) => eprintln!("error: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closest_key_catches_transpositions() {
        let valid = &["host", "port", "username", "password", "from", "starttls"];
        assert_eq!(closest_key("hsot", valid), Some("host".to_string()));
        assert_eq!(closest_key("pasword", valid), Some("password".to_string()));
    }

    #[test]
    fn closest_key_rejects_unrelated_input() {
        assert_eq!(closest_key("zzzzzz", &["schedule", "currency_symbol"]), None);
    }

    #[test]
    fn key_offset_scopes_to_the_named_section() {
        let content = "[service]\nname = \"finbell\"\n\n[smtp]\nhsot = \"mail.example.com\"\n";
        let offset = key_offset(content, &["smtp".to_string()], "hsot").unwrap();
        assert_eq!(&content[offset..offset + 4], "hsot");
        assert!(offset > content.find("[smtp]").unwrap());
    }

    #[test]
    fn key_offset_finds_top_level_keys() {
        assert_eq!(key_offset("retries = 3\n", &[], "retries"), Some(0));
    }

    #[test]
    fn key_offset_skips_keys_that_merely_share_a_prefix() {
        let content = "[smtp]\nstarttls_timeout = 5\nstarttls = true\n";
        let offset = key_offset(content, &["smtp".to_string()], "starttls").unwrap();
        assert_eq!(&content[offset..], "starttls = true\n");
    }

    #[test]
    fn key_offset_misses_absent_keys() {
        let content = "[smtp]\nhost = \"x\"\n";
        assert_eq!(key_offset(content, &["smtp".to_string()], "port"), None);
    }

    #[test]
    fn unknown_field_diagnostic_carries_a_suggestion() {
        let err = crate::loader::load_config_from_str("[smtp]\nhsot = \"x\"\n")
            .expect_err("unknown key must be rejected");
        let diags = diagnose(err, &[]);
        assert!(diags.iter().any(|d| matches!(
            d,
            ConfigError::UnknownKey { key, hint, .. }
                if key == "hsot" && hint.contains("did you mean `host`")
        )));
    }
}
