//! ppsampler CLI - probability-proportional-to-size sampling for CSV/TSV files.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use commands::sample::SampleArgs;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Columns { file, json } => commands::columns::run(file, json, cli.verbose),

        Commands::Bins {
            file,
            column,
            strategy,
            bins,
            cutoffs,
            labels,
            json,
        } => commands::bins::run(file, column, strategy, bins, cutoffs, labels, json, cli.verbose),

        Commands::Sample {
            file,
            column,
            mode,
            size,
            bins,
            cutoffs,
            labels,
            weights,
            seed,
            output,
            preview,
            json,
        } => commands::sample::run(
            SampleArgs {
                file,
                column,
                mode,
                size,
                bins,
                cutoffs,
                labels,
                weights,
                seed,
                output,
                preview,
                json,
            },
            cli.verbose,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
