//! Layered configuration
//!
//! `defaults/ftl.default.toml` is embedded into the library so the documented defaults and
//! the runtime behavior cannot drift apart. Callers layer their own files and key overrides
//! on top with [`Loader`] before deserializing into [`FtlConfig`].

use crate::ftl::formats::Format;
use crate::ftl::parsing::{DuplicatePolicy, ParserOptions};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/ftl.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct FtlConfig {
    pub parser: ParserConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    pub duplicates: DuplicatePolicy,
    pub max_nesting: usize,
}

impl From<&ParserConfig> for ParserOptions {
    fn from(config: &ParserConfig) -> Self {
        ParserOptions {
            duplicates: config.duplicates,
            max_nesting: config.max_nesting,
        }
    }
}

/// How the command line tool prints a parsed resource
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: Format,
    pub show_line_numbers: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
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

    /// Layer a configuration file that may be absent
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (`parser.max_nesting`, `output.format`, ...)
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<FtlConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<FtlConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ftl::lexing::DEFAULT_MAX_NESTING;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.parser.duplicates, DuplicatePolicy::Preserve);
        assert_eq!(config.parser.max_nesting, DEFAULT_MAX_NESTING);
        assert_eq!(config.output.format, Format::Treeviz);
        assert!(!config.output.show_line_numbers);
    }

    #[test]
    fn defaults_match_parser_options() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(ParserOptions::from(&config.parser), ParserOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("parser.duplicates", "reject")
            .expect("override to apply")
            .set_override("output.format", "json")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.parser.duplicates, DuplicatePolicy::Reject);
        assert_eq!(config.output.format, Format::Json);
    }

    #[test]
    fn rejects_unknown_format() {
        let result = Loader::new()
            .set_override("output.format", "xml")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/ftl.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.parser.max_nesting, DEFAULT_MAX_NESTING);
    }

    #[test]
    fn missing_required_file_fails() {
        assert!(Loader::new().with_file("/nonexistent/ftl.toml").build().is_err());
    }
}
