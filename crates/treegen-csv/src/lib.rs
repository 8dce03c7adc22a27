//! CSV output for treegen datasets.
//!
//! This crate flattens generated transaction trees into CSV, one row per
//! node in pre-order, using the treegen-generator crate for the data.
//!
//! # Example
//!
//! ```ignore
//! use treegen_csv::CsvTreeWriter;
//! use treegen_generator::{DatasetConfig, TransactionGenerator};
//!
//! let generator = TransactionGenerator::new(DatasetConfig::default())?;
//! let trees = generator.generate_data()?;
//!
//! let writer = CsvTreeWriter::new(generator.universe().clone());
//! let metrics = writer.write(&trees, "/path/to/output.csv")?;
//! ```

pub mod args;
mod error;
mod writer;

pub use args::{CsvGenerateArgs, DatasetArgs};
pub use error::CsvWriterError;
pub use writer::{CsvTreeWriter, WriteMetrics, DEFAULT_BUFFER_SIZE};
