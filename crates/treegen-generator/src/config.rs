//! Dataset configuration.
//!
//! A [`DatasetConfig`] can be built in code or loaded from YAML:
//!
//! ```yaml
//! total_trees: 100
//! total_patterns: 20
//! avg_pattern_length: 4.0
//! total_fields: 10
//! values_per_field: 100
//! threshold: 5
//! seed: 7
//! ```

use crate::error::{ConfigError, GeneratorError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use treegen_core::IDENTITY_FIELDS;

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;

fn default_seed() -> u64 {
    DEFAULT_SEED
}

/// Parameters of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Number of transactions to generate
    pub total_trees: u64,

    /// Number of patterns to plant
    #[serde(default)]
    pub total_patterns: u64,

    /// Mean pattern length in edges
    pub avg_pattern_length: f64,

    /// Fields per record, including `tid`, `rid` and `parent`
    pub total_fields: usize,

    /// Legal values per domain field
    pub values_per_field: usize,

    /// Minimum number of placements of the longest pattern
    pub threshold: u64,

    /// Upper bound on fields per pattern node (defaults to every domain field)
    #[serde(default)]
    pub max_fields_per_record: Option<usize>,

    /// Log the generated patterns before assembly
    #[serde(default)]
    pub print_patterns: bool,

    /// Random seed (same seed and config = same data)
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self::new(20, 25, 4.0, 10, 100, 3)
    }
}

impl DatasetConfig {
    /// Create a config with the default seed and no field cap.
    pub fn new(
        total_trees: u64,
        total_patterns: u64,
        avg_pattern_length: f64,
        total_fields: usize,
        values_per_field: usize,
        threshold: u64,
    ) -> Self {
        Self {
            total_trees,
            total_patterns,
            avg_pattern_length,
            total_fields,
            values_per_field,
            threshold,
            max_fields_per_record: None,
            print_patterns: false,
            seed: DEFAULT_SEED,
        }
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Cap the number of fields a pattern node may carry.
    pub fn with_max_fields_per_record(mut self, max: usize) -> Self {
        self.max_fields_per_record = Some(max);
        self
    }

    /// Log generated patterns before assembly.
    pub fn with_print_patterns(mut self, print_patterns: bool) -> Self {
        self.print_patterns = print_patterns;
        self
    }

    /// Parse a config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a config from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Number of domain fields (total fields minus the identity fields).
    pub fn domain_fields(&self) -> usize {
        self.total_fields.saturating_sub(IDENTITY_FIELDS.len())
    }

    /// Effective per-node field cap.
    pub fn field_cap(&self) -> usize {
        self.max_fields_per_record
            .unwrap_or_else(|| self.domain_fields())
    }

    /// Check every parameter, reporting the first offending one.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.total_trees < 1 {
            return Err(GeneratorError::invalid(
                "total_trees",
                self.total_trees,
                "there must be at least one tree",
            ));
        }
        if !self.avg_pattern_length.is_finite() || self.avg_pattern_length < 1.0 {
            return Err(GeneratorError::invalid(
                "avg_pattern_length",
                self.avg_pattern_length,
                "a pattern must have at least one edge on average",
            ));
        }
        if self.total_fields < IDENTITY_FIELDS.len() + 1 {
            return Err(GeneratorError::invalid(
                "total_fields",
                self.total_fields,
                "at least 4 are required, 3 are reserved for tid, rid and parent",
            ));
        }
        if self.values_per_field < 1 {
            return Err(GeneratorError::invalid(
                "values_per_field",
                self.values_per_field,
                "every field needs at least one value",
            ));
        }
        if self.threshold < 1 {
            return Err(GeneratorError::invalid(
                "threshold",
                self.threshold,
                "a pattern must appear at least once",
            ));
        }
        if let Some(max) = self.max_fields_per_record {
            if max < 1 || max > self.domain_fields() {
                return Err(GeneratorError::invalid(
                    "max_fields_per_record",
                    max,
                    "must be between 1 and total_fields - 3",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parameter_of(err: GeneratorError) -> &'static str {
        match err {
            GeneratorError::InvalidConfig { parameter, .. } => parameter,
            other => panic!("Expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_default_is_valid() {
        let config = DatasetConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.domain_fields(), 7);
        assert_eq!(config.field_cap(), 7);
    }

    #[test]
    fn test_from_yaml_applies_defaults() {
        let yaml = r#"
total_trees: 100
avg_pattern_length: 3.5
total_fields: 8
values_per_field: 10
threshold: 5
"#;
        let config = DatasetConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.total_trees, 100);
        assert_eq!(config.total_patterns, 0);
        assert_eq!(config.avg_pattern_length, 3.5);
        assert_eq!(config.max_fields_per_record, None);
        assert!(!config.print_patterns);
        assert_eq!(config.seed, DEFAULT_SEED);
    }

    #[test]
    fn test_from_yaml_missing_required_key() {
        let result = DatasetConfig::from_yaml("total_trees: 10\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "total_trees: 3\ntotal_patterns: 2\navg_pattern_length: 2\ntotal_fields: 5\n\
             values_per_field: 4\nthreshold: 1\nmax_fields_per_record: 1\nseed: 9"
        )
        .unwrap();

        let config = DatasetConfig::from_file(file.path()).unwrap();
        assert_eq!(
            config,
            DatasetConfig::new(3, 2, 2.0, 5, 4, 1)
                .with_max_fields_per_record(1)
                .with_seed(9)
        );
    }

    #[test]
    fn test_from_file_missing() {
        let result = DatasetConfig::from_file("/nonexistent/treegen.yaml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_rejects_zero_trees() {
        let err = DatasetConfig::new(0, 1, 2.0, 10, 10, 1)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("total_trees"));
        assert!(err.to_string().contains('0'));
        assert_eq!(parameter_of(err), "total_trees");
    }

    #[test]
    fn test_rejects_short_average_length() {
        let err = DatasetConfig::new(10, 1, 0.5, 10, 10, 1)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("0.5"));
        assert_eq!(parameter_of(err), "avg_pattern_length");

        let err = DatasetConfig::new(10, 1, f64::NAN, 10, 10, 1)
            .validate()
            .unwrap_err();
        assert_eq!(parameter_of(err), "avg_pattern_length");
    }

    #[test]
    fn test_rejects_too_few_fields() {
        let err = DatasetConfig::new(10, 1, 2.0, 3, 10, 1)
            .validate()
            .unwrap_err();
        assert_eq!(parameter_of(err), "total_fields");
        assert!(DatasetConfig::new(10, 1, 2.0, 4, 10, 1).validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_values() {
        let err = DatasetConfig::new(10, 1, 2.0, 10, 0, 1)
            .validate()
            .unwrap_err();
        assert_eq!(parameter_of(err), "values_per_field");
    }

    #[test]
    fn test_rejects_zero_threshold() {
        let err = DatasetConfig::new(10, 1, 2.0, 10, 10, 0)
            .validate()
            .unwrap_err();
        assert_eq!(parameter_of(err), "threshold");
    }

    #[test]
    fn test_rejects_out_of_range_field_cap() {
        let base = DatasetConfig::new(10, 1, 2.0, 10, 10, 1);

        let err = base
            .clone()
            .with_max_fields_per_record(0)
            .validate()
            .unwrap_err();
        assert_eq!(parameter_of(err), "max_fields_per_record");

        let err = base
            .clone()
            .with_max_fields_per_record(8)
            .validate()
            .unwrap_err();
        assert_eq!(parameter_of(err), "max_fields_per_record");

        assert!(base.with_max_fields_per_record(7).validate().is_ok());
    }
}
