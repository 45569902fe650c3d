//! Shared configuration loader for the drafty tools.
//!
//! `defaults/drafty.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`DraftyConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/drafty.default.toml");

/// Top-level configuration consumed by drafty applications.
#[derive(Debug, Clone, Deserialize)]
pub struct DraftyConfig {
    pub shorten: ShortenConfig,
    pub preview: PreviewConfig,
    pub reply: ReplyConfig,
    pub markdown: MarkdownConfig,
}

/// Knobs of the plain truncation transform.
#[derive(Debug, Clone, Deserialize)]
pub struct ShortenConfig {
    pub length: usize,
    pub strip_heavy: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewConfig {
    pub length: usize,
    pub max_attachments: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplyConfig {
    pub length: usize,
    pub max_attachments: usize,
}

/// Markdown output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub plain_links: bool,
}

impl MarkdownConfig {
    /// The settings as serializer options for the `markdown` format.
    pub fn format_options(&self) -> HashMap<String, String> {
        let mut options = HashMap::new();
        if self.plain_links {
            options.insert("plain-links".to_string(), "true".to_string());
        }
        options
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
    pub fn build(self) -> Result<DraftyConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<DraftyConfig, ConfigError> {
    Loader::new().build()
}
