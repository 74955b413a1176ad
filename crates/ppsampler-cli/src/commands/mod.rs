//! CLI command implementations.

pub mod bins;
pub mod columns;
pub mod sample;

use std::path::{Path, PathBuf};

use colored::Colorize;
use ppsampler::{BinSummary, BinningStrategy, Projection, parse_cutoffs, parse_labels};

use crate::cli::ModeChoice;

/// Turn the mode flag plus bin options into a strategy. `None` means automatic.
pub(crate) fn build_strategy(
    mode: ModeChoice,
    num_bins: usize,
    cutoffs: Option<&str>,
) -> Result<Option<BinningStrategy>, Box<dyn std::error::Error>> {
    let strategy = match mode {
        ModeChoice::Automatic => {
            if cutoffs.is_some() {
                return Err("--cutoffs only applies to manual-cutoff mode".into());
            }
            return Ok(None);
        }
        ModeChoice::EqualWidth => BinningStrategy::EqualWidth { num_bins },
        ModeChoice::EqualFrequency => BinningStrategy::EqualFrequency { num_bins },
        ModeChoice::ManualCutoff => {
            let raw = cutoffs.ok_or("manual-cutoff mode requires --cutoffs")?;
            BinningStrategy::ManualCutoff {
                num_bins,
                cutoffs: parse_cutoffs(raw)?,
            }
        }
    };
    Ok(Some(strategy))
}

/// Parse an optional comma-separated label list; blank input means no labels.
pub(crate) fn labels_arg(labels: Option<&str>) -> Option<Vec<String>> {
    labels.map(parse_labels).filter(|l| !l.is_empty())
}

/// `<dir>/<stem>_sampled.csv` next to the input file.
pub(crate) fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{}_sampled.csv", stem))
}

pub(crate) fn print_bin_table(bins: &[BinSummary], show_weights: bool) {
    let range_width = bins.iter().map(|b| b.range.len()).max().unwrap_or(5).max(5);
    let label_width = bins.iter().map(|b| b.label.len()).max().unwrap_or(5).max(5);

    if show_weights {
        println!(
            "  {:>3}  {:<rw$}  {:<lw$}  {:>8}  {:>6}  {:>9}",
            "#".dimmed(),
            "Range".dimmed(),
            "Label".dimmed(),
            "Weight".dimmed(),
            "Rows".dimmed(),
            "Mass".dimmed(),
            rw = range_width,
            lw = label_width
        );
    } else {
        println!(
            "  {:>3}  {:<rw$}  {:<lw$}  {:>6}",
            "#".dimmed(),
            "Range".dimmed(),
            "Label".dimmed(),
            "Rows".dimmed(),
            rw = range_width,
            lw = label_width
        );
    }

    for bin in bins {
        let rows = if bin.row_count == 0 {
            bin.row_count.to_string().yellow()
        } else {
            bin.row_count.to_string().white()
        };
        if show_weights {
            println!(
                "  {:>3}  {:<rw$}  {:<lw$}  {:>8}  {:>6}  {:>8.2}%",
                bin.ordinal,
                bin.range.cyan(),
                bin.label,
                bin.weight,
                rows,
                bin.probability_mass * 100.0,
                rw = range_width,
                lw = label_width
            );
        } else {
            println!(
                "  {:>3}  {:<rw$}  {:<lw$}  {:>6}",
                bin.ordinal,
                bin.range.cyan(),
                bin.label,
                rows,
                rw = range_width,
                lw = label_width
            );
        }
    }
}

pub(crate) fn print_projection(projection: &Projection) {
    let widths: Vec<usize> = projection
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            projection
                .rows
                .iter()
                .filter_map(|r| r.get(i))
                .map(|v| v.len())
                .max()
                .unwrap_or(0)
                .max(h.len())
        })
        .collect();

    let header: Vec<String> = projection
        .headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:<w$}", h, w = *w))
        .collect();
    println!("  {}", header.join("  ").dimmed());

    for row in &projection.rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<w$}", v, w = *w))
            .collect();
        println!("  {}", cells.join("  "));
    }
}
