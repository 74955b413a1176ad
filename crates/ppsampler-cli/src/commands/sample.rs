//! Sample command - draw a PPS sample and write it to CSV.

use std::path::PathBuf;

use colored::Colorize;
use ppsampler::{PpsSampler, SampleResult, SamplerConfig, SamplingRequest, parse_weights};
use serde::Serialize;

use super::{build_strategy, default_output_path, labels_arg, print_bin_table, print_projection};
use crate::cli::ModeChoice;

/// Machine-readable summary of one sampling run.
#[derive(Serialize)]
struct SampleReport<'a> {
    file: &'a str,
    output: String,
    drawable: usize,
    #[serde(flatten)]
    result: &'a SampleResult,
}

/// Options for one sample run.
pub struct SampleArgs {
    pub file: PathBuf,
    pub column: String,
    pub mode: ModeChoice,
    pub size: usize,
    pub bins: usize,
    pub cutoffs: Option<String>,
    pub labels: Option<String>,
    pub weights: Option<String>,
    pub seed: Option<u64>,
    pub output: Option<PathBuf>,
    pub preview: Option<usize>,
    pub json: bool,
}

pub fn run(args: SampleArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let request = build_request(&args)?;

    let mut config = SamplerConfig::default();
    if let Some(rows) = args.preview {
        config = config.with_preview_rows(rows);
    }
    let sampler = PpsSampler::with_config(config);
    let preview = sampler.config().preview_rows;

    let (table, source) = sampler.load(&args.file)?;
    if verbose && !args.json {
        println!(
            "Loaded {} rows x {} columns from {}",
            source.row_count, source.column_count, source.file
        );
    }

    let population = sampler.prepare(&table, &request)?;
    let result = sampler.draw(&table, &population, request.sample_size, request.seed)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.file));
    result.write_csv(&output)?;

    if args.json {
        let report = SampleReport {
            file: &source.file,
            output: output.display().to_string(),
            drawable: population.drawable(),
            result: &result,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} rows from {} by {} ({})",
        "Sampled".green().bold(),
        result.len().to_string().white().bold(),
        source.file.white(),
        result.column.white().bold(),
        result.mode
    );
    println!(
        "  Population: {} rows ({} drawable), seed {}",
        population.size(),
        population.drawable(),
        result.seed
    );

    if verbose && !result.bins.is_empty() {
        println!();
        print_bin_table(&result.bins, true);
    }

    if preview > 0 && !result.is_empty() {
        println!();
        println!("{}", "Preview:".cyan().bold());
        print_projection(&result.preview(preview));
        if result.len() > preview {
            println!("  {}", format!("... {} more", result.len() - preview).dimmed());
        }
    }

    println!();
    println!("Wrote {}", output.display().to_string().white().bold());

    Ok(())
}

fn build_request(args: &SampleArgs) -> Result<SamplingRequest, Box<dyn std::error::Error>> {
    let strategy = build_strategy(args.mode, args.bins, args.cutoffs.as_deref())?;

    let mut request = match strategy {
        Some(strategy) => SamplingRequest::binned(&args.column, strategy, args.size),
        None => SamplingRequest::automatic(&args.column, args.size),
    };
    if let Some(labels) = labels_arg(args.labels.as_deref()) {
        request = request.with_labels(labels);
    }
    if let Some(raw) = &args.weights {
        let weights = parse_weights(raw)?;
        if !weights.is_empty() {
            request = request.with_weights(weights);
        }
    }
    if let Some(seed) = args.seed {
        request = request.with_seed(seed);
    }
    Ok(request)
}
