//! Columns command - list the numeric columns a sample can be drawn on.

use std::path::PathBuf;

use colored::Colorize;
use ppsampler::PpsSampler;

pub fn run(file: PathBuf, json_output: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let sampler = PpsSampler::new();
    let (table, source) = sampler.load(&file)?;
    let columns = sampler.numeric_columns(&table)?;

    if json_output {
        let report = serde_json::json!({
            "file": source.file,
            "rows": source.row_count,
            "columns": columns,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows, {} columns)",
        "Numeric columns in".cyan().bold(),
        source.file.white(),
        source.row_count,
        source.column_count
    );
    if verbose {
        println!("  Hash: {}", source.hash.dimmed());
    }
    println!();

    let name_width = columns.keys().map(|k| k.len()).max().unwrap_or(6).max(6);
    println!(
        "  {:<w$}  {:>12}  {:>12}  {:>8}  {:>6}  {:>12}",
        "Column".dimmed(),
        "Min".dimmed(),
        "Max".dimmed(),
        "Values".dimmed(),
        "Nulls".dimmed(),
        "Non-positive".dimmed(),
        w = name_width
    );
    for (name, summary) in &columns {
        let non_positive = if summary.non_positive_count > 0 {
            summary.non_positive_count.to_string().yellow()
        } else {
            summary.non_positive_count.to_string().normal()
        };
        println!(
            "  {:<w$}  {:>12}  {:>12}  {:>8}  {:>6}  {:>12}",
            name.green(),
            summary.min,
            summary.max,
            summary.count,
            source.row_count - summary.count,
            non_positive,
            w = name_width
        );
    }

    let skipped = source.column_count - columns.len();
    if skipped > 0 {
        println!();
        println!("  {} non-numeric column(s) not shown", skipped.to_string().yellow());
    }

    Ok(())
}
