//! Bins command - preview the bins a strategy produces before choosing weights.

use std::path::PathBuf;

use colored::Colorize;
use ppsampler::{PpsSampler, WeightAssigner, WeightTable};

use super::{build_strategy, labels_arg, print_bin_table};
use crate::cli::ModeChoice;

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    column: String,
    strategy: ModeChoice,
    num_bins: usize,
    cutoffs: Option<String>,
    labels: Option<String>,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let strategy = build_strategy(strategy, num_bins, cutoffs.as_deref())?
        .ok_or("bins needs a binning strategy: equal-width, equal-frequency, or manual-cutoff")?;
    let labels = labels_arg(labels.as_deref());

    let sampler = PpsSampler::new();
    let (table, source) = sampler.load(&file)?;
    if verbose {
        println!("Loaded {} rows from {}", source.row_count, source.file);
    }

    let binning = sampler.bin_column(&table, &column, &strategy, labels.as_deref())?;
    let weights = WeightTable::for_binning(&binning, None)?;
    let probabilities = WeightAssigner::binned(&column, &binning, &weights)?;
    let summary = WeightAssigner::summarize(&binning, &weights, &probabilities);

    if json_output {
        let report = serde_json::json!({
            "file": source.file,
            "column": column,
            "strategy": binning.strategy,
            "binned_rows": binning.binned_row_count(),
            "bins": summary,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} ({})",
        "Bins for".cyan().bold(),
        column.white().bold(),
        strategy
    );
    println!();
    print_bin_table(&summary, false);
    println!();
    println!(
        "  {} of {} rows binned",
        binning.binned_row_count().to_string().white().bold(),
        source.row_count
    );

    let empty = summary.iter().filter(|b| b.row_count == 0).count();
    if empty > 0 {
        println!(
            "  {} {} bin(s) hold no rows and can never be sampled",
            "Warning:".yellow(),
            empty
        );
    }

    Ok(())
}
