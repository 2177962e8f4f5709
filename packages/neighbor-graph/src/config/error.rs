//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Range validation error
    #[error("Invalid range for field '{field}': {value} not in {min}..={max}. {hint}")]
    Range {
        field: String,
        value: String,
        min: String,
        max: String,
        hint: String,
    },

    /// Dimension selection refers to components the embedding does not have
    #[error("Dimension {requested} requested but the embedding only has {available} dimensions")]
    DimensionOutOfBounds { requested: usize, available: usize },

    /// Dimension selection is empty or repeats a component
    #[error("Invalid dimension selection: {0}")]
    InvalidDimensions(String),

    /// File output target cannot be written
    #[error("Output target {path:?} is not writable: {reason}")]
    OutputNotWritable { path: PathBuf, reason: String },

    /// Missing version field in YAML
    #[error("Missing 'version' field in configuration file. Add 'version: 1' to the top of your YAML file.")]
    MissingVersion,

    /// Unsupported version
    #[error("Unsupported configuration version {found}. Supported versions: {}", supported.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    /// Unknown preset name
    #[error("Unknown preset '{0}'. Valid presets: fast, balanced, exact")]
    UnknownPreset(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error (also covers wrongly typed fields such as non-boolean flags)
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Create a range error with a hint
    pub fn range_with_hint(
        field: impl Into<String>,
        value: impl ToString,
        min: impl ToString,
        max: impl ToString,
        hint: impl Into<String>,
    ) -> Self {
        Self::Range {
            field: field.into(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
            hint: hint.into(),
        }
    }

    /// Create an output-not-writable error
    pub fn not_writable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::OutputNotWritable {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
