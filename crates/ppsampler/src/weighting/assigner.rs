//! Per-row probability derivation and normalization.

use serde::{Deserialize, Serialize};

use super::table::WeightTable;
use crate::binning::Binning;
use crate::error::{PpsError, Result};

/// Normalized selection probabilities over the sampling population.
///
/// Only rows that belong to the population appear here; excluded rows (null
/// values, and non-positive values in automatic mode) have no entry at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityTable {
    /// Source row index of each population member, ascending.
    pub rows: Vec<usize>,
    /// Probability of each member, parallel to `rows`.
    pub probabilities: Vec<f64>,
    /// Unnormalized weight of each member, parallel to `rows`. Sampling draws
    /// on these, since a tiny weight can round to a zero probability.
    pub weights: Vec<f64>,
}

impl ProbabilityTable {
    /// Population size.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all probabilities; 1.0 up to rounding.
    pub fn total(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Probability of a source row, or `None` if it is outside the population.
    pub fn probability_of(&self, row: usize) -> Option<f64> {
        self.rows
            .binary_search(&row)
            .ok()
            .map(|pos| self.probabilities[pos])
    }

    /// Members that can actually be drawn (weight above zero).
    pub fn drawable_count(&self) -> usize {
        self.weights.iter().filter(|&&w| w > 0.0).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.rows
            .iter()
            .copied()
            .zip(self.probabilities.iter().copied())
    }
}

/// What one bin contributes to the probability distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinSummary {
    pub ordinal: usize,
    pub range: String,
    pub label: String,
    pub weight: f64,
    pub row_count: usize,
    /// Combined probability of every row in the bin.
    pub probability_mass: f64,
}

/// Derives probabilities from raw values or from bin weights.
pub struct WeightAssigner;

impl WeightAssigner {
    /// Probability proportional to the value itself.
    ///
    /// Rows with a null or non-positive value are left out of the population.
    pub fn automatic(column: &str, values: &[Option<f64>]) -> Result<ProbabilityTable> {
        let (rows, raw): (Vec<usize>, Vec<f64>) = values
            .iter()
            .enumerate()
            .filter_map(|(row, v)| v.filter(|&x| x > 0.0).map(|x| (row, x)))
            .unzip();

        if rows.is_empty() {
            return Err(PpsError::EmptyPopulation {
                column: column.to_string(),
                reason: "no non-null positive values".to_string(),
            });
        }
        normalize(rows, raw)
    }

    /// Probability proportional to the weight of the row's bin.
    ///
    /// Unbinned (null) rows are left out of the population. Rows in a
    /// zero-weight bin stay in with probability 0.
    pub fn binned(column: &str, binning: &Binning, weights: &WeightTable) -> Result<ProbabilityTable> {
        if weights.len() != binning.bin_count() {
            return Err(PpsError::WeightCountMismatch {
                expected: binning.bin_count(),
                actual: weights.len(),
            });
        }

        let mut rows = Vec::new();
        let mut raw = Vec::new();
        for (row, assignment) in binning.assignments.iter().enumerate() {
            if let Some(bin) = assignment {
                let weight = weights
                    .weight_at(*bin)
                    .ok_or_else(|| PpsError::Binning(format!("No weight for bin {}", bin + 1)))?;
                rows.push(row);
                raw.push(weight);
            }
        }

        if rows.is_empty() {
            return Err(PpsError::EmptyPopulation {
                column: column.to_string(),
                reason: "no rows fall into any bin".to_string(),
            });
        }
        normalize(rows, raw)
    }

    /// Per-bin weight, row count and probability mass.
    pub fn summarize(
        binning: &Binning,
        weights: &WeightTable,
        probabilities: &ProbabilityTable,
    ) -> Vec<BinSummary> {
        let mut mass = vec![0.0; binning.bin_count()];
        for (row, p) in probabilities.iter() {
            if let Some(Some(bin)) = binning.assignments.get(row) {
                mass[*bin] += p;
            }
        }

        binning
            .bins
            .iter()
            .zip(binning.row_counts())
            .enumerate()
            .map(|(i, (bin, row_count))| BinSummary {
                ordinal: bin.ordinal,
                range: bin.range.clone(),
                label: bin.label.clone(),
                weight: weights.weight_at(i).unwrap_or(0.0),
                row_count,
                probability_mass: mass[i],
            })
            .collect()
    }
}

/// Divide every raw weight by the total, which must be finite and positive.
fn normalize(rows: Vec<usize>, raw: Vec<f64>) -> Result<ProbabilityTable> {
    let total: f64 = raw.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(PpsError::ZeroOrInvalidTotal { total });
    }
    let probabilities = raw.iter().map(|w| w / total).collect();
    Ok(ProbabilityTable {
        rows,
        probabilities,
        weights: raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binning::{BinningEngine, BinningStrategy};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_automatic_filters_and_normalizes() {
        let values = vec![Some(10.0), None, Some(0.0), Some(30.0), Some(-5.0), Some(60.0)];
        let probs = WeightAssigner::automatic("revenue", &values).unwrap();

        assert_eq!(probs.rows, vec![0, 3, 5]);
        assert!(approx(probs.probabilities[0], 0.1));
        assert!(approx(probs.probabilities[1], 0.3));
        assert!(approx(probs.probabilities[2], 0.6));
        assert!(approx(probs.total(), 1.0));
        assert_eq!(probs.probability_of(2), None);
    }

    #[test]
    fn test_automatic_tiny_value_stays_drawable() {
        let values = vec![Some(1e300), Some(1e-310)];
        let probs = WeightAssigner::automatic("x", &values).unwrap();
        assert_eq!(probs.probabilities[1], 0.0);
        assert_eq!(probs.drawable_count(), 2);
    }

    #[test]
    fn test_automatic_empty_population() {
        let values = vec![None, Some(0.0), Some(-1.0)];
        let err = WeightAssigner::automatic("revenue", &values).unwrap_err();
        assert!(matches!(err, PpsError::EmptyPopulation { .. }));
    }

    #[test]
    fn test_automatic_overflowing_total() {
        let values = vec![Some(f64::MAX), Some(f64::MAX)];
        let err = WeightAssigner::automatic("x", &values).unwrap_err();
        assert!(matches!(err, PpsError::ZeroOrInvalidTotal { .. }));
    }

    fn three_bins() -> Binning {
        let values = vec![Some(1.0), Some(2.0), None, Some(5.0), Some(9.0), Some(10.0)];
        BinningEngine::bin(&values, &BinningStrategy::EqualWidth { num_bins: 3 }).unwrap()
    }

    #[test]
    fn test_binned_probabilities() {
        let binning = three_bins();
        let weights = WeightTable::for_binning(&binning, Some(&[1.0, 2.0, 3.0])).unwrap();
        let probs = WeightAssigner::binned("x", &binning, &weights).unwrap();

        // Raw weights 1, 1, 2, 3, 3 over rows 0, 1, 3, 4, 5.
        assert_eq!(probs.rows, vec![0, 1, 3, 4, 5]);
        assert!(approx(probs.probabilities[0], 0.1));
        assert!(approx(probs.probabilities[2], 0.2));
        assert!(approx(probs.probabilities[4], 0.3));
        assert!(approx(probs.total(), 1.0));
    }

    #[test]
    fn test_binned_all_zero_weights() {
        let binning = three_bins();
        let weights = WeightTable::for_binning(&binning, Some(&[0.0, 0.0, 0.0])).unwrap();
        let err = WeightAssigner::binned("x", &binning, &weights).unwrap_err();
        assert!(matches!(err, PpsError::ZeroOrInvalidTotal { .. }));
    }

    #[test]
    fn test_binned_zero_weight_bin_stays_in_population() {
        let binning = three_bins();
        let weights = WeightTable::for_binning(&binning, Some(&[0.0, 1.0, 1.0])).unwrap();
        let probs = WeightAssigner::binned("x", &binning, &weights).unwrap();
        assert_eq!(probs.len(), 5);
        assert_eq!(probs.drawable_count(), 3);
        assert_eq!(probs.probability_of(0), Some(0.0));
    }

    #[test]
    fn test_binned_weight_count_mismatch() {
        let binning = three_bins();
        let labels = vec!["a".to_string(), "b".to_string()];
        let weights = WeightTable::new(&labels, &[1.0, 1.0]).unwrap();
        let err = WeightAssigner::binned("x", &binning, &weights).unwrap_err();
        assert!(matches!(
            err,
            PpsError::WeightCountMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_summarize() {
        let binning = three_bins();
        let weights = WeightTable::for_binning(&binning, Some(&[1.0, 2.0, 3.0])).unwrap();
        let probs = WeightAssigner::binned("x", &binning, &weights).unwrap();
        let summary = WeightAssigner::summarize(&binning, &weights, &probs);

        assert_eq!(summary.len(), 3);
        assert_eq!(
            summary.iter().map(|s| s.row_count).collect::<Vec<_>>(),
            vec![2, 1, 2]
        );
        assert!(approx(summary[0].probability_mass, 0.2));
        assert!(approx(summary[1].probability_mass, 0.2));
        assert!(approx(summary[2].probability_mass, 0.6));
        assert_eq!(summary[2].weight, 3.0);
    }
}
