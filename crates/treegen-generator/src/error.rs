//! Error types for the generator.

use thiserror::Error;

/// Error type for generator operations.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A configuration value is out of range
    #[error("Invalid value for '{parameter}': {value} ({reason})")]
    InvalidConfig {
        parameter: &'static str,
        value: String,
        reason: &'static str,
    },

    /// Pattern synthesis failed
    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl GeneratorError {
    pub(crate) fn invalid(
        parameter: &'static str,
        value: impl ToString,
        reason: &'static str,
    ) -> Self {
        Self::InvalidConfig {
            parameter,
            value: value.to_string(),
            reason,
        }
    }
}

/// Errors raised while synthesizing a single pattern.
#[derive(Debug, Error)]
pub enum PatternError {
    /// Pattern length must be at least one edge
    #[error("The length must be at least 1. Given {0}")]
    InvalidLength(usize),

    /// No candidate fields to sample from
    #[error("At least one candidate field is required")]
    NoFields,

    /// Per-record field cap must be at least one
    #[error("max_fields_per_record must be at least 1. Given {0}")]
    InvalidFieldCap(usize),

    /// A candidate field has no values in the universe
    #[error("Field '{0}' has no values in the universe")]
    UnknownField(String),

    /// Distinct-node sampling gave up
    #[error(
        "Universe too small for requested pattern shape: needed {requested} distinct nodes, \
         found {distinct}"
    )]
    UniverseTooSmall { requested: usize, distinct: usize },
}

/// Errors raised while loading a dataset configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error reading config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
