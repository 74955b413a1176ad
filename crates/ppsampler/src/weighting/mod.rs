//! Turning a column (or its bins) into per-row selection probabilities.

mod assigner;
mod parse;
mod table;

pub use assigner::{BinSummary, ProbabilityTable, WeightAssigner};
pub use parse::{parse_cutoffs, parse_labels, parse_weights};
pub use table::WeightTable;
