//! Ordered label-to-weight mapping.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::binning::Binning;
use crate::error::{PpsError, Result};

/// Weight per bin label, in ascending bin order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTable {
    entries: IndexMap<String, f64>,
}

impl WeightTable {
    /// Pair labels with weights. Counts must match, labels must be unique and
    /// weights must be finite and non-negative.
    pub fn new(labels: &[String], weights: &[f64]) -> Result<Self> {
        if weights.len() != labels.len() {
            return Err(PpsError::WeightCountMismatch {
                expected: labels.len(),
                actual: weights.len(),
            });
        }

        let mut entries = IndexMap::with_capacity(labels.len());
        for (label, &weight) in labels.iter().zip(weights) {
            if !weight.is_finite() {
                return Err(PpsError::InvalidWeightFormat {
                    token: weight.to_string(),
                });
            }
            if weight < 0.0 {
                return Err(PpsError::NegativeWeight {
                    label: label.clone(),
                    weight,
                });
            }
            if entries.insert(label.clone(), weight).is_some() {
                return Err(PpsError::DuplicateLabel(label.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Weight 1.0 for every label.
    pub fn uniform(labels: &[String]) -> Result<Self> {
        Self::new(labels, &vec![1.0; labels.len()])
    }

    /// Weights for the bins of `binning`; `None` means uniform.
    pub fn for_binning(binning: &Binning, weights: Option<&[f64]>) -> Result<Self> {
        let labels: Vec<String> = binning.bins.iter().map(|b| b.label.clone()).collect();
        match weights {
            Some(w) => Self::new(&labels, w),
            None => Self::uniform(&labels),
        }
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries.get(label).copied()
    }

    /// Weight at a bin position.
    pub fn weight_at(&self, index: usize) -> Option<f64> {
        self.entries.get_index(index).map(|(_, w)| *w)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(l, w)| (l.as_str(), *w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_keeps_order() {
        let table = WeightTable::new(&labels(&["c", "a", "b"]), &[3.0, 1.0, 2.0]).unwrap();
        let order: Vec<&str> = table.iter().map(|(l, _)| l).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
        assert_eq!(table.get("a"), Some(1.0));
        assert_eq!(table.weight_at(0), Some(3.0));
    }

    #[test]
    fn test_count_mismatch() {
        let err = WeightTable::new(&labels(&["a", "b", "c"]), &[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            PpsError::WeightCountMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_negative_weight() {
        let err = WeightTable::new(&labels(&["a", "b"]), &[1.0, -0.5]).unwrap_err();
        assert!(matches!(err, PpsError::NegativeWeight { .. }));
    }

    #[test]
    fn test_non_finite_weight() {
        let err = WeightTable::new(&labels(&["a"]), &[f64::NAN]).unwrap_err();
        assert!(matches!(err, PpsError::InvalidWeightFormat { .. }));
    }

    #[test]
    fn test_duplicate_label() {
        let err = WeightTable::new(&labels(&["a", "a"]), &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, PpsError::DuplicateLabel(_)));
    }

    #[test]
    fn test_uniform() {
        let table = WeightTable::uniform(&labels(&["x", "y"])).unwrap();
        assert_eq!(table.iter().map(|(_, w)| w).collect::<Vec<_>>(), vec![1.0, 1.0]);
    }
}
