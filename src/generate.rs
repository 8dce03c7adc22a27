//! Generate command handler.

use anyhow::Context;
use treegen_csv::{CsvGenerateArgs, CsvTreeWriter, WriteMetrics};
use treegen_generator::TransactionGenerator;

/// Run the generate command: build the dataset and write it as CSV.
///
/// Returns `None` in dry-run mode, which builds the pattern plan but writes
/// no transactions.
pub fn run_generate(args: CsvGenerateArgs) -> anyhow::Result<Option<WriteMetrics>> {
    let config = args
        .dataset
        .resolve()
        .context("Failed to load dataset configuration")?;

    let generator =
        TransactionGenerator::new(config).context("Invalid dataset configuration")?;
    let config = generator.config();

    if args.dry_run {
        tracing::info!(
            "[DRY-RUN] Would generate {} transactions with {} patterns (seed={})",
            config.total_trees,
            config.total_patterns,
            config.seed
        );
        tracing::info!(
            "[DRY-RUN] {} fields per record, {} values per field, threshold {}",
            config.total_fields,
            config.values_per_field,
            config.threshold
        );
        let plan = generator
            .plan()
            .context("Failed to generate patterns")?;
        tracing::info!(
            "[DRY-RUN] Planned {} pattern instances",
            plan.placements().iter().map(Vec::len).sum::<usize>()
        );
        tracing::info!("[DRY-RUN] Output: {}", args.output.display());
        tracing::info!("[DRY-RUN] Configuration and patterns validated successfully");
        return Ok(None);
    }

    tracing::info!(
        "Generating {} transactions with {} patterns (seed={})",
        config.total_trees,
        config.total_patterns,
        config.seed
    );

    let transactions = generator
        .generate_data()
        .context("Failed to generate transactions")?;

    let metrics = CsvTreeWriter::new(generator.universe().clone())
        .with_header(!args.no_header)
        .write(&transactions, &args.output)
        .with_context(|| format!("Failed to write CSV file {:?}", args.output))?;

    tracing::info!(
        "Wrote {} transactions ({} records) to {}",
        metrics.trees_written,
        metrics.rows_written,
        args.output.display()
    );

    Ok(Some(metrics))
}
