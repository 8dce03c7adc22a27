//! CLI argument definitions for dataset generation.

use clap::Args;
use std::path::PathBuf;
use treegen_generator::{ConfigError, DatasetConfig};

/// Dataset parameters.
///
/// Values come from `--config` when given, then any flag set on the command
/// line overrides the corresponding file value. Without a config file, unset
/// flags fall back to [`DatasetConfig::default`].
#[derive(Args, Clone, Debug, Default)]
pub struct DatasetArgs {
    /// Path to dataset config YAML file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Number of transactions to generate
    #[arg(long)]
    pub total_trees: Option<u64>,

    /// Number of patterns to plant
    #[arg(long)]
    pub total_patterns: Option<u64>,

    /// Mean pattern length in edges
    #[arg(long)]
    pub avg_pattern_length: Option<f64>,

    /// Fields per record, including tid, rid and parent (at least 4)
    #[arg(long)]
    pub total_fields: Option<usize>,

    /// Legal values per domain field
    #[arg(long)]
    pub values_per_field: Option<usize>,

    /// Minimum number of transactions the longest pattern is planted in
    #[arg(long)]
    pub threshold: Option<u64>,

    /// Upper bound on fields per pattern node
    #[arg(long)]
    pub max_fields_per_record: Option<usize>,

    /// Random seed for deterministic generation (same seed = same data)
    #[arg(long, env = "TREEGEN_SEED")]
    pub seed: Option<u64>,

    /// Log the generated patterns before assembly (`--print-patterns=false` disables)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub print_patterns: Option<bool>,
}

impl DatasetArgs {
    /// Build the effective dataset config.
    pub fn resolve(&self) -> Result<DatasetConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => DatasetConfig::from_file(path)?,
            None => DatasetConfig::default(),
        };

        if let Some(v) = self.total_trees {
            config.total_trees = v;
        }
        if let Some(v) = self.total_patterns {
            config.total_patterns = v;
        }
        if let Some(v) = self.avg_pattern_length {
            config.avg_pattern_length = v;
        }
        if let Some(v) = self.total_fields {
            config.total_fields = v;
        }
        if let Some(v) = self.values_per_field {
            config.values_per_field = v;
        }
        if let Some(v) = self.threshold {
            config.threshold = v;
        }
        if let Some(v) = self.max_fields_per_record {
            config.max_fields_per_record = Some(v);
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
        if let Some(v) = self.print_patterns {
            config.print_patterns = v;
        }

        Ok(config)
    }
}

/// CSV-specific generate arguments.
#[derive(Args, Clone, Debug)]
pub struct CsvGenerateArgs {
    /// Output CSV file
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    /// Omit the header row
    #[arg(long)]
    pub no_header: bool,

    /// Dry-run mode: validate configuration and patterns without writing data
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub dataset: DatasetArgs,
}
