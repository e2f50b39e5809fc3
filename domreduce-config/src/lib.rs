//! Shared configuration loader for the domreduce toolchain.
//!
//! `defaults/domreduce.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`ReduceConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use domreduce::{
    ApproxTokenCounter, HeaderSeparator, ReduceError, ReducerOptions, StageRegistry, TokenCounter,
};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

const DEFAULT_TOML: &str = include_str!("../defaults/domreduce.default.toml");

/// File picked up from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "domreduce.toml";

/// Top-level configuration consumed by domreduce applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ReduceConfig {
    pub pipeline: PipelineConfig,
    pub attributes: AttributesConfig,
    pub media: MediaConfig,
    pub tables: TablesConfig,
    pub tokens: TokensConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    pub stages: Vec<String>,
}

/// Knobs of `simplify-attributes`.
#[derive(Debug, Clone, Deserialize)]
pub struct AttributesConfig {
    pub allowed: Vec<String>,
    pub max_class_tokens: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    pub data_uri_max_len: usize,
    pub max_image_area: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TablesConfig {
    pub header_separator: HeaderSeparatorMode,
    pub large_table_rows: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum HeaderSeparatorMode {
    #[serde(rename = "always")]
    Always,
    #[serde(rename = "marked")]
    Marked,
}

impl From<HeaderSeparatorMode> for HeaderSeparator {
    fn from(mode: HeaderSeparatorMode) -> Self {
        match mode {
            HeaderSeparatorMode::Always => HeaderSeparator::Always,
            HeaderSeparatorMode::Marked => HeaderSeparator::Marked,
        }
    }
}

/// How sizes are measured in the reduction report.
#[derive(Debug, Clone, Deserialize)]
pub struct TokensConfig {
    pub counter: TokenCounterKind,
    pub chars_per_token: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TokenCounterKind {
    #[serde(rename = "approx")]
    Approx,
    #[serde(rename = "cl100k")]
    Cl100k,
}

impl TokensConfig {
    /// Build the configured counter.
    ///
    /// `cl100k` needs the `tiktoken` feature; without it the request is reported as a
    /// tokenizer error rather than silently measured with the approximation.
    pub fn build_counter(&self) -> Result<Arc<dyn TokenCounter>, ReduceError> {
        match self.counter {
            TokenCounterKind::Approx => {
                Ok(Arc::new(ApproxTokenCounter::new(self.chars_per_token)))
            }
            #[cfg(feature = "tiktoken")]
            TokenCounterKind::Cl100k => Ok(Arc::new(domreduce::Cl100kTokenCounter::new()?)),
            #[cfg(not(feature = "tiktoken"))]
            TokenCounterKind::Cl100k => Err(ReduceError::Tokenizer(
                "cl100k counting requires the tiktoken feature".to_string(),
            )),
        }
    }
}

impl From<&ReduceConfig> for ReducerOptions {
    fn from(config: &ReduceConfig) -> Self {
        ReducerOptions {
            allowed_attributes: config.attributes.allowed.clone(),
            max_class_tokens: config.attributes.max_class_tokens,
            data_uri_max_len: config.media.data_uri_max_len,
            max_image_area: config.media.max_image_area,
            header_separator: config.tables.header_separator.into(),
            large_table_rows: config.tables.large_table_rows,
        }
    }
}

impl ReduceConfig {
    pub fn reducer_options(&self) -> ReducerOptions {
        ReducerOptions::from(self)
    }

    /// Registry with the built-in stages tuned by this configuration.
    pub fn registry(&self) -> StageRegistry {
        StageRegistry::with_options(&self.reducer_options())
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ReduceConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ReduceConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.pipeline.stages, domreduce::DEFAULT_PIPELINE);
        assert_eq!(config.attributes.max_class_tokens, 6);
        assert_eq!(config.tables.header_separator, HeaderSeparatorMode::Always);
        assert_eq!(config.tokens.counter, TokenCounterKind::Approx);
    }

    #[test]
    fn defaults_convert_to_default_options() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.reducer_options(), ReducerOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("tables.header_separator", "marked")
            .expect("override to apply")
            .set_override("media.max_image_area", 1000)
            .expect("override to apply")
            .set_override("pipeline.stages", vec!["parse", "minify-whitespace"])
            .expect("override to apply")
            .build()
            .expect("config to build");

        let options = config.reducer_options();
        assert_eq!(options.header_separator, HeaderSeparator::Marked);
        assert_eq!(options.max_image_area, 1000);
        assert_eq!(config.pipeline.stages, vec!["parse", "minify-whitespace"]);
    }

    #[test]
    fn user_file_layers_over_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[attributes]\nallowed = [\"id\", \"data-keep\"]").expect("write");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.attributes.allowed, vec!["id", "data-keep"]);
        assert_eq!(config.attributes.max_class_tokens, 6);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new()
            .with_file("/definitely/not/here/domreduce.toml")
            .build();
        assert!(result.is_err());

        let optional = Loader::new()
            .with_optional_file("/definitely/not/here/domreduce.toml")
            .build();
        assert!(optional.is_ok());
    }

    #[test]
    fn unknown_header_mode_is_rejected() {
        let result = Loader::new()
            .set_override("tables.header_separator", "sometimes")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn approx_counter_uses_configured_ratio() {
        let config = Loader::new()
            .set_override("tokens.chars_per_token", 2.0)
            .expect("override to apply")
            .build()
            .expect("config to build");
        let counter = config.tokens.build_counter().expect("counter");
        assert_eq!(counter.count("abcdef"), 3);
    }

    #[cfg(not(feature = "tiktoken"))]
    #[test]
    fn cl100k_without_feature_is_a_tokenizer_error() {
        let config = Loader::new()
            .set_override("tokens.counter", "cl100k")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(matches!(
            config.tokens.build_counter(),
            Err(ReduceError::Tokenizer(_))
        ));
    }
}
