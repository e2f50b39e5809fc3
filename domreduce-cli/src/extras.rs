//! `--extra-<name> [value]` handling
//!
//! Any configuration knob can be overridden for a single run without writing a
//! config file:
//!
//! ```text
//! domreduce page.html --extra-max-class-tokens 3 --extra-header-separator marked
//! ```
//!
//! The arguments are pulled out of argv before clap sees them, then applied to
//! the loaded [`ReduceConfig`]. Boolean-style flags without a value default to "true".
//!
//! Recognized keys:
//!
//! - `pipeline`: comma-separated stage list
//! - `allowed-attributes` (`allow`): comma-separated attribute names
//! - `max-class-tokens`, `data-uri-max-len`, `max-image-area`, `large-table-rows`
//! - `header-separator`: `always` or `marked`
//! - `token-counter`: `approx` or `cl100k`; `chars-per-token`

use domreduce_config::{HeaderSeparatorMode, ReduceConfig, TokenCounterKind};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// An `--extra-*` value that does not fit its setting
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidOverride {
    pub key: String,
    pub value: String,
    pub expected: &'static str,
}

impl fmt::Display for InvalidOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid value '{}' for --extra-{}: expected {}",
            self.value, self.key, self.expected
        )
    }
}

impl std::error::Error for InvalidOverride {}

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
pub fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

        if let Some(key) = key {
            let value = args.get(i + 1).filter(|next| !next.starts_with('-'));
            match value {
                Some(value) => {
                    extra_params.insert(key.to_string(), value.clone());
                    i += 2;
                }
                None => {
                    extra_params.insert(key.to_string(), "true".to_string());
                    i += 1;
                }
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

/// Apply the recognized overrides to `config`, removing them from `extra_params`.
///
/// Unrecognized keys are left in the map for the caller to report.
pub fn apply_config_overrides(
    config: &mut ReduceConfig,
    extra_params: &mut HashMap<String, String>,
) -> Result<(), InvalidOverride> {
    if let Some(raw) = extra_params.remove("pipeline") {
        config.pipeline.stages = split_list(&raw);
    }

    if let Some(raw) = take_override(extra_params, &["allowed-attributes", "allow"]) {
        config.attributes.allowed = split_list(&raw);
    }
    if let Some(raw) = extra_params.remove("max-class-tokens") {
        config.attributes.max_class_tokens = parse_number("max-class-tokens", &raw)?;
    }

    if let Some(raw) = extra_params.remove("data-uri-max-len") {
        config.media.data_uri_max_len = parse_number("data-uri-max-len", &raw)?;
    }
    if let Some(raw) = extra_params.remove("max-image-area") {
        config.media.max_image_area = parse_number("max-image-area", &raw)?;
    }

    if let Some(raw) = extra_params.remove("header-separator") {
        config.tables.header_separator = match raw.to_lowercase().as_str() {
            "always" => HeaderSeparatorMode::Always,
            "marked" => HeaderSeparatorMode::Marked,
            _ => return Err(invalid("header-separator", &raw, "'always' or 'marked'")),
        };
    }
    if let Some(raw) = extra_params.remove("large-table-rows") {
        config.tables.large_table_rows = parse_number("large-table-rows", &raw)?;
    }

    if let Some(raw) = extra_params.remove("token-counter") {
        config.tokens.counter = match raw.to_lowercase().as_str() {
            "approx" => TokenCounterKind::Approx,
            "cl100k" => TokenCounterKind::Cl100k,
            _ => return Err(invalid("token-counter", &raw, "'approx' or 'cl100k'")),
        };
    }
    if let Some(raw) = extra_params.remove("chars-per-token") {
        let ratio: f64 = parse_number("chars-per-token", &raw)?;
        if ratio <= 0.0 {
            return Err(invalid("chars-per-token", &raw, "a positive number"));
        }
        config.tokens.chars_per_token = ratio;
    }

    Ok(())
}

/// Split a comma-separated list, trimming entries and dropping empty ones
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_number<T: FromStr>(key: &str, raw: &str) -> Result<T, InvalidOverride> {
    raw.trim()
        .parse()
        .map_err(|_| invalid(key, raw, "a number"))
}

fn invalid(key: &str, value: &str, expected: &'static str) -> InvalidOverride {
    InvalidOverride {
        key: key.to_string(),
        value: value.to_string(),
        expected,
    }
}
