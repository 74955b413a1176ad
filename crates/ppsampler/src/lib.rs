//! ppsampler: probability-proportional-to-size sampling for tabular datasets.
//!
//! Given a numeric column, ppsampler derives a selection probability for every
//! row and draws a weighted sample without replacement.
//!
//! # Modes
//!
//! - **Automatic**: probability is the row's value divided by the column total.
//!   Null and non-positive values are left out.
//! - **Binned**: the column is split into bins (equal-width, equal-frequency,
//!   or manual cutoffs) and every row takes the weight of its bin.
//!
//! # Determinism
//!
//! Sampling uses exponential-clock keys drawn from a seeded generator (seed 42
//! unless overridden), so the same table and request always give the same sample.
//!
//! # Example
//!
//! ```no_run
//! use ppsampler::{BinningStrategy, PpsSampler, SamplingRequest};
//!
//! let sampler = PpsSampler::new();
//! let (table, _source) = sampler.load("invoices.csv").unwrap();
//!
//! let request = SamplingRequest::binned("amount", BinningStrategy::EqualWidth { num_bins: 3 }, 25)
//!     .with_weights(vec![1.0, 2.0, 4.0]);
//! let sample = sampler.sample(&table, &request).unwrap();
//!
//! sample.write_csv("sampled_data.csv").unwrap();
//! ```

pub mod binning;
pub mod error;
pub mod input;
pub mod schema;
pub mod weighting;

mod pipeline;
mod projection;
mod request;
mod sampler;

pub use binning::{Bin, Binning, BinningEngine, BinningStrategy, MAX_BINS};
pub use error::{PpsError, Result};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
pub use pipeline::{PpsSampler, PreparedPopulation, SamplerConfig};
pub use projection::{PROBABILITY_COLUMN, Projection, ResultProjector, SampleResult, SampledRow};
pub use request::{SamplingMode, SamplingRequest};
pub use sampler::{DEFAULT_SEED, Sampler};
pub use schema::{ColumnSchema, ColumnType, NumericSummary, TableSchema};
pub use weighting::{
    BinSummary, ProbabilityTable, WeightAssigner, WeightTable, parse_cutoffs, parse_labels,
    parse_weights,
};
