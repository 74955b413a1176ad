//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ppsampler: probability-proportional-to-size sampling for CSV/TSV data
#[derive(Parser)]
#[command(name = "ppsampler")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the numeric columns that can drive sampling
    Columns {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the bins a strategy would produce, without sampling
    Bins {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Numeric column to bin
        #[arg(short, long)]
        column: String,

        /// Binning strategy (equal-width, equal-frequency, manual-cutoff)
        #[arg(short, long, default_value = "equal-width")]
        strategy: ModeChoice,

        /// Number of bins
        #[arg(short, long, default_value = "3")]
        bins: usize,

        /// Interior breakpoints for manual-cutoff, comma-separated (e.g. "30, 60")
        #[arg(long)]
        cutoffs: Option<String>,

        /// Bin labels, comma-separated, in ascending bin order
        #[arg(long)]
        labels: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Draw a PPS sample and export it as CSV
    Sample {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Numeric column that drives selection
        #[arg(short, long)]
        column: String,

        /// Sampling mode (automatic, equal-width, equal-frequency, manual-cutoff)
        #[arg(short, long, default_value = "automatic")]
        mode: ModeChoice,

        /// Number of rows to draw
        #[arg(short = 'n', long)]
        size: usize,

        /// Number of bins (binned modes)
        #[arg(short, long, default_value = "3")]
        bins: usize,

        /// Interior breakpoints for manual-cutoff, comma-separated
        #[arg(long)]
        cutoffs: Option<String>,

        /// Bin labels, comma-separated, in ascending bin order
        #[arg(long)]
        labels: Option<String>,

        /// Bin weights, comma-separated, in ascending bin order (default: 1.0 each)
        #[arg(short, long)]
        weights: Option<String>,

        /// Random seed (default: 42)
        #[arg(long)]
        seed: Option<u64>,

        /// Output path for the sample (default: <file>_sampled.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of sampled rows to preview (default: 5)
        #[arg(long)]
        preview: Option<usize>,

        /// Output a JSON report instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Sampling mode choice
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeChoice {
    /// Probability proportional to the value itself
    #[default]
    Automatic,
    /// Equal-length bins between min and max
    EqualWidth,
    /// Quantile bins holding roughly equal row counts
    EqualFrequency,
    /// Bins from user-supplied breakpoints
    ManualCutoff,
}

impl std::str::FromStr for ModeChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "automatic" | "auto" => Ok(ModeChoice::Automatic),
            "equal-width" | "width" | "cut" => Ok(ModeChoice::EqualWidth),
            "equal-frequency" | "quantile" | "qcut" => Ok(ModeChoice::EqualFrequency),
            "manual-cutoff" | "manual" | "cutoff" => Ok(ModeChoice::ManualCutoff),
            _ => Err(format!(
                "Unknown mode: {}. Use: automatic, equal-width, equal-frequency, or manual-cutoff.",
                s
            )),
        }
    }
}

impl std::fmt::Display for ModeChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModeChoice::Automatic => write!(f, "automatic"),
            ModeChoice::EqualWidth => write!(f, "equal-width"),
            ModeChoice::EqualFrequency => write!(f, "equal-frequency"),
            ModeChoice::ManualCutoff => write!(f, "manual-cutoff"),
        }
    }
}
