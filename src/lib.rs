//! treegen - labeled tree datasets with planted frequent subtree patterns.
//!
//! The heavy lifting lives in the workspace crates:
//!
//! - `treegen-core` - pattern and transaction tree types
//! - `treegen-generator` - pattern synthesis, placement and tree assembly
//! - `treegen-csv` - CSV output and CLI arguments
//!
//! This crate wires them together behind the `treegen` binary.

pub mod generate;

pub use generate::run_generate;
pub use treegen_csv::{CsvGenerateArgs, DatasetArgs};

use tracing_subscriber::EnvFilter;

/// Log directives used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Log filter from `RUST_LOG`, falling back to [`DEFAULT_LOG_FILTER`].
pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
