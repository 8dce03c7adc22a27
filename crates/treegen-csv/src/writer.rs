//! CSV writer for generated transactions.

use crate::error::CsvWriterError;
use csv::Writer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use treegen_core::{record_header, FieldUniverse, TransactionNode};

/// Default buffer size for CSV writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Metrics from a write operation.
#[derive(Debug, Clone, Default)]
pub struct WriteMetrics {
    /// Number of transactions written.
    pub trees_written: u64,
    /// Number of rows (nodes) written.
    pub rows_written: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Output file size in bytes.
    pub file_size_bytes: u64,
}

impl WriteMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Writes transaction trees as CSV, one row per node.
///
/// Columns are `transaction_id`, `record_id`, `parent_id`, then one column
/// per universe field in universe order.
pub struct CsvTreeWriter {
    universe: FieldUniverse,
    include_header: bool,
}

impl CsvTreeWriter {
    /// Create a writer for transactions over the given universe.
    pub fn new(universe: FieldUniverse) -> Self {
        Self {
            universe,
            include_header: true,
        }
    }

    /// Set whether to include a header row in the CSV output.
    pub fn with_header(mut self, include_header: bool) -> Self {
        self.include_header = include_header;
        self
    }

    /// Write transactions to a new file at `output_path`.
    pub fn write<P: AsRef<Path>>(
        &self,
        transactions: &[TransactionNode],
        output_path: P,
    ) -> Result<WriteMetrics, CsvWriterError> {
        let start_time = Instant::now();
        let output_path = output_path.as_ref();
        info!(
            "Writing {} transactions to CSV file '{}'",
            transactions.len(),
            output_path.display()
        );

        let file = File::create(output_path)?;
        let buf_writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut metrics = self.write_to(transactions, buf_writer)?;

        metrics.file_size_bytes = std::fs::metadata(output_path)?.len();
        metrics.total_duration = start_time.elapsed();

        info!(
            "CSV write complete: {} rows, {} bytes in {:?} ({:.2} rows/sec)",
            metrics.rows_written,
            metrics.file_size_bytes,
            metrics.total_duration,
            metrics.rows_per_second()
        );

        Ok(metrics)
    }

    /// Write transactions to any writer. The writer is flushed before returning.
    pub fn write_to<W: Write>(
        &self,
        transactions: &[TransactionNode],
        output: W,
    ) -> Result<WriteMetrics, CsvWriterError> {
        let start_time = Instant::now();
        let mut metrics = WriteMetrics::default();
        let mut writer = Writer::from_writer(output);

        if self.include_header {
            writer.write_record(record_header(&self.universe))?;
        }

        for tree in transactions {
            for node in tree.nodes() {
                writer.write_record(node.to_record(&self.universe))?;
                metrics.rows_written += 1;
            }
            metrics.trees_written += 1;

            if metrics.trees_written % 10000 == 0 {
                debug!("Written {} transactions", metrics.trees_written);
            }
        }

        writer.flush()?;
        metrics.total_duration = start_time.elapsed();
        Ok(metrics)
    }
}
