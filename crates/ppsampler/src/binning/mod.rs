//! Partitioning a numeric column into ordered bins.
//!
//! Every strategy reduces to a strictly ascending list of `num_bins + 1`
//! edges. The first bin is closed on both ends so it holds the minimum; every
//! other bin is open on the low end and closed on the high end. Rows with a
//! null value get no bin and drop out of the sampling population.

mod equal_width;
mod manual;
mod quantile;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{PpsError, Result};

pub use manual::TOP_EDGE_NUDGE;

/// Largest bin count any strategy accepts.
pub const MAX_BINS: usize = 10_000;

/// How the value range of a column is split into bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum BinningStrategy {
    /// Equal-length intervals between the column minimum and maximum.
    EqualWidth { num_bins: usize },
    /// Quantile cut points, so bins hold roughly the same number of rows.
    EqualFrequency { num_bins: usize },
    /// User-chosen interior breakpoints (`num_bins - 1` of them).
    ManualCutoff { num_bins: usize, cutoffs: Vec<f64> },
}

impl BinningStrategy {
    /// Number of bins this strategy must produce.
    pub fn num_bins(&self) -> usize {
        match self {
            BinningStrategy::EqualWidth { num_bins }
            | BinningStrategy::EqualFrequency { num_bins }
            | BinningStrategy::ManualCutoff { num_bins, .. } => *num_bins,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BinningStrategy::EqualWidth { .. } => "equal-width",
            BinningStrategy::EqualFrequency { .. } => "equal-frequency",
            BinningStrategy::ManualCutoff { .. } => "manual-cutoff",
        }
    }
}

impl std::fmt::Display for BinningStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} bins)", self.name(), self.num_bins())
    }
}

/// One interval of a binning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    /// 1-based position in ascending value order.
    pub ordinal: usize,
    pub low: f64,
    pub high: f64,
    /// Whether `low` itself belongs to the bin (only the first bin).
    pub low_inclusive: bool,
    /// Interval notation, e.g. `(4, 7]`.
    pub range: String,
    /// Display label: a user label, or the range string.
    pub label: String,
}

impl Bin {
    /// Check whether a value falls inside this bin.
    pub fn contains(&self, value: f64) -> bool {
        let above_low = if self.low_inclusive {
            value >= self.low
        } else {
            value > self.low
        };
        above_low && value <= self.high
    }
}

/// Result of binning one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Binning {
    /// Strategy that produced the bins.
    pub strategy: BinningStrategy,
    /// Bins in ascending value order.
    pub bins: Vec<Bin>,
    /// Per row: index into `bins`, or `None` for a null value.
    pub assignments: Vec<Option<usize>>,
}

impl Binning {
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// Bin of a row, if it has one.
    pub fn bin_of(&self, row: usize) -> Option<&Bin> {
        self.assignments
            .get(row)
            .copied()
            .flatten()
            .map(|idx| &self.bins[idx])
    }

    /// Number of rows that landed in each bin.
    pub fn row_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.bins.len()];
        for idx in self.assignments.iter().flatten() {
            counts[*idx] += 1;
        }
        counts
    }

    /// Number of rows with a bin.
    pub fn binned_row_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.is_some()).count()
    }

    /// Labels in bin order.
    pub fn labels(&self) -> Vec<&str> {
        self.bins.iter().map(|b| b.label.as_str()).collect()
    }

    /// Replace the default labels with user labels, one per bin in ascending order.
    pub fn with_labels(mut self, labels: &[String]) -> Result<Self> {
        if labels.len() != self.bins.len() {
            return Err(PpsError::LabelCountMismatch {
                expected: self.bins.len(),
                actual: labels.len(),
            });
        }
        let mut seen = HashSet::new();
        for label in labels {
            if !seen.insert(label.as_str()) {
                return Err(PpsError::DuplicateLabel(label.clone()));
            }
        }
        for (bin, label) in self.bins.iter_mut().zip(labels) {
            bin.label = label.clone();
        }
        Ok(self)
    }
}

/// Assigns rows to bins.
pub struct BinningEngine;

impl BinningEngine {
    /// Bin a column given one value per row (`None` for null).
    pub fn bin(values: &[Option<f64>], strategy: &BinningStrategy) -> Result<Binning> {
        let num_bins = strategy.num_bins();
        if num_bins < 2 {
            return Err(PpsError::Binning(format!(
                "Number of bins must be at least 2, got {}",
                num_bins
            )));
        }
        if num_bins > MAX_BINS {
            return Err(PpsError::Binning(format!(
                "Number of bins must be at most {}, got {}",
                MAX_BINS, num_bins
            )));
        }

        let present: Vec<f64> = values.iter().flatten().copied().collect();
        if present.is_empty() {
            return Err(PpsError::Binning(
                "Column has no non-null values to bin".to_string(),
            ));
        }
        if matches!(strategy, BinningStrategy::EqualFrequency { .. }) && num_bins > present.len()
        {
            return Err(PpsError::Binning(format!(
                "Cannot split {} values into {} equal-frequency bins",
                present.len(),
                num_bins
            )));
        }
        let min = present.iter().copied().fold(f64::INFINITY, f64::min);
        let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let edges = match strategy {
            BinningStrategy::EqualWidth { num_bins } => equal_width::edges(min, max, *num_bins)?,
            BinningStrategy::EqualFrequency { num_bins } => quantile::edges(present, *num_bins)?,
            BinningStrategy::ManualCutoff { num_bins, cutoffs } => {
                manual::edges(min, max, *num_bins, cutoffs)?
            }
        };
        debug_assert_eq!(edges.len(), num_bins + 1);

        let bins = bins_from_edges(&edges);
        let assignments = values
            .iter()
            .map(|v| v.and_then(|v| locate(&edges, v)))
            .collect();

        Ok(Binning {
            strategy: strategy.clone(),
            bins,
            assignments,
        })
    }
}

fn bins_from_edges(edges: &[f64]) -> Vec<Bin> {
    edges
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let low_inclusive = i == 0;
            let range = format!(
                "{}{}, {}]",
                if low_inclusive { '[' } else { '(' },
                format_edge(pair[0]),
                format_edge(pair[1])
            );
            Bin {
                ordinal: i + 1,
                low: pair[0],
                high: pair[1],
                low_inclusive,
                label: range.clone(),
                range,
            }
        })
        .collect()
}

/// Index of the bin holding `value`, given strictly ascending edges.
fn locate(edges: &[f64], value: f64) -> Option<usize> {
    let last = edges.len() - 1;
    if value < edges[0] || value > edges[last] {
        return None;
    }
    // Count the upper edges strictly below the value: that many bins lie entirely beneath it.
    Some(edges[1..].partition_point(|&upper| upper < value))
}

/// Render an edge without floating-point noise (`100.01`, not `100.01000000000001`).
fn format_edge(value: f64) -> String {
    let rounded = (value * 1e9).round() / 1e9;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

/// Fail unless the edges are strictly ascending.
fn ensure_ascending(edges: &[f64], what: &str) -> Result<()> {
    if edges.windows(2).all(|w| w[0] < w[1]) {
        Ok(())
    } else {
        Err(PpsError::Binning(format!(
            "{} must be strictly ascending: {:?}",
            what, edges
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_equal_width_thirds() {
        let values = some(&[1.0, 4.0, 5.0, 7.5, 10.0]);
        let binning =
            BinningEngine::bin(&values, &BinningStrategy::EqualWidth { num_bins: 3 }).unwrap();

        let edges: Vec<(f64, f64)> = binning.bins.iter().map(|b| (b.low, b.high)).collect();
        assert_eq!(edges, vec![(1.0, 4.0), (4.0, 7.0), (7.0, 10.0)]);
        assert_eq!(binning.labels(), vec!["[1, 4]", "(4, 7]", "(7, 10]"]);
        // Minimum in bin 1, maximum in bin 3, an edge value in the lower bin.
        assert_eq!(
            binning.assignments,
            vec![Some(0), Some(0), Some(1), Some(2), Some(2)]
        );
    }

    #[test]
    fn test_equal_width_rejects_constant_column() {
        let values = some(&[5.0, 5.0, 5.0]);
        let err = BinningEngine::bin(&values, &BinningStrategy::EqualWidth { num_bins: 2 })
            .unwrap_err();
        assert!(matches!(err, PpsError::Binning(_)));
    }

    #[test]
    fn test_too_few_bins() {
        let values = some(&[1.0, 2.0]);
        for strategy in [
            BinningStrategy::EqualWidth { num_bins: 1 },
            BinningStrategy::EqualFrequency { num_bins: 0 },
            BinningStrategy::ManualCutoff {
                num_bins: 1,
                cutoffs: vec![],
            },
        ] {
            assert!(matches!(
                BinningEngine::bin(&values, &strategy),
                Err(PpsError::Binning(_))
            ));
        }
    }

    #[test]
    fn test_too_many_bins() {
        let values = some(&[1.0, 2.0, 3.0]);
        for num_bins in [MAX_BINS + 1, usize::MAX] {
            for strategy in [
                BinningStrategy::EqualWidth { num_bins },
                BinningStrategy::EqualFrequency { num_bins },
                BinningStrategy::ManualCutoff {
                    num_bins,
                    cutoffs: vec![1.5],
                },
            ] {
                assert!(matches!(
                    BinningEngine::bin(&values, &strategy),
                    Err(PpsError::Binning(_))
                ));
            }
        }
    }

    #[test]
    fn test_equal_width_allows_max_bins() {
        let values = some(&[0.0, 1.0]);
        let strategy = BinningStrategy::EqualWidth { num_bins: MAX_BINS };
        let binning = BinningEngine::bin(&values, &strategy).unwrap();
        assert_eq!(binning.bin_count(), MAX_BINS);
        assert_eq!(binning.row_counts().iter().sum::<usize>(), 2);
    }

    #[test]
    fn test_equal_frequency_more_bins_than_values() {
        let values = some(&[1.0, 2.0, 3.0]);
        let quantiles = |num_bins| BinningEngine::bin(&values, &BinningStrategy::EqualFrequency { num_bins });

        assert!(matches!(quantiles(4), Err(PpsError::Binning(_))));
        assert!(matches!(quantiles(1_000_000_000), Err(PpsError::Binning(_))));
        assert_eq!(quantiles(3).unwrap().row_counts(), vec![1, 1, 1]);
    }

    #[test]
    fn test_nulls_are_unbinned() {
        let values = vec![Some(1.0), None, Some(3.0)];
        let binning =
            BinningEngine::bin(&values, &BinningStrategy::EqualWidth { num_bins: 2 }).unwrap();
        assert_eq!(binning.assignments, vec![Some(0), None, Some(1)]);
        assert_eq!(binning.binned_row_count(), 2);
        assert!(binning.bin_of(1).is_none());
        assert_eq!(binning.bin_of(2).unwrap().ordinal, 2);
    }

    #[test]
    fn test_all_null_column() {
        let values = vec![None, None];
        assert!(matches!(
            BinningEngine::bin(&values, &BinningStrategy::EqualWidth { num_bins: 2 }),
            Err(PpsError::Binning(_))
        ));
    }

    #[test]
    fn test_with_labels() {
        let values = some(&[1.0, 2.0, 3.0]);
        let binning =
            BinningEngine::bin(&values, &BinningStrategy::EqualWidth { num_bins: 2 }).unwrap();

        let labelled = binning
            .clone()
            .with_labels(&["Low".to_string(), "High".to_string()])
            .unwrap();
        assert_eq!(labelled.labels(), vec!["Low", "High"]);
        assert_eq!(labelled.bins[0].range, "[1, 2]");

        let err = binning
            .clone()
            .with_labels(&["Only".to_string()])
            .unwrap_err();
        assert!(matches!(
            err,
            PpsError::LabelCountMismatch {
                expected: 2,
                actual: 1
            }
        ));

        let err = binning
            .with_labels(&["Same".to_string(), "Same".to_string()])
            .unwrap_err();
        assert!(matches!(err, PpsError::DuplicateLabel(_)));
    }

    #[test]
    fn test_row_counts() {
        let values = some(&[1.0, 2.0, 9.0, 10.0, 10.0]);
        let binning =
            BinningEngine::bin(&values, &BinningStrategy::EqualWidth { num_bins: 3 }).unwrap();
        assert_eq!(binning.row_counts(), vec![2, 0, 3]);
    }

    #[test]
    fn test_bin_contains() {
        let values = some(&[0.0, 10.0]);
        let binning =
            BinningEngine::bin(&values, &BinningStrategy::EqualWidth { num_bins: 2 }).unwrap();
        assert!(binning.bins[0].contains(0.0));
        assert!(binning.bins[0].contains(5.0));
        assert!(!binning.bins[1].contains(5.0));
        assert!(binning.bins[1].contains(10.0));
    }

    #[test]
    fn test_format_edge() {
        assert_eq!(format_edge(100.0 + 0.01), "100.01");
        assert_eq!(format_edge(0.1 + 0.2), "0.3");
        assert_eq!(format_edge(-0.0), "0");
        assert_eq!(format_edge(-2.5), "-2.5");
    }
}
