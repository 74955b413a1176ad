//! Per-column schema and numeric summary.

use serde::{Deserialize, Serialize};

use super::types::ColumnType;

/// Summary of the non-null values of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    /// Number of non-null values.
    pub count: usize,
    /// Number of values `<= 0`, which automatic mode drops.
    pub non_positive_count: usize,
}

impl NumericSummary {
    /// Summarize a sequence of values, or `None` if it is empty.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut summary: Option<NumericSummary> = None;
        for v in values {
            let s = summary.get_or_insert(NumericSummary {
                min: v,
                max: v,
                sum: 0.0,
                count: 0,
                non_positive_count: 0,
            });
            s.min = s.min.min(v);
            s.max = s.max.max(v);
            s.sum += v;
            s.count += 1;
            if v <= 0.0 {
                s.non_positive_count += 1;
            }
        }
        summary
    }

    /// Width of the value range.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Number of values that survive the automatic-mode filter.
    pub fn positive_count(&self) -> usize {
        self.count - self.non_positive_count
    }
}

/// Schema for a single column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name.
    pub name: String,
    /// Zero-based position in the table.
    pub position: usize,
    /// Inferred data type.
    pub inferred_type: ColumnType,
    /// Number of null/missing cells.
    pub null_count: usize,
    /// Present for numeric columns only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericSummary>,
}

impl ColumnSchema {
    /// Create a new column schema with basic information.
    pub fn new(name: impl Into<String>, position: usize) -> Self {
        Self {
            name: name.into(),
            position,
            inferred_type: ColumnType::Empty,
            null_count: 0,
            numeric: None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.inferred_type.is_numeric()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_values() {
        let s = NumericSummary::from_values([3.0, -1.0, 0.0, 8.0]).unwrap();
        assert_eq!(s.min, -1.0);
        assert_eq!(s.max, 8.0);
        assert_eq!(s.sum, 10.0);
        assert_eq!(s.count, 4);
        assert_eq!(s.non_positive_count, 2);
        assert_eq!(s.positive_count(), 2);
        assert_eq!(s.range(), 9.0);
    }

    #[test]
    fn test_summary_empty() {
        assert!(NumericSummary::from_values(std::iter::empty()).is_none());
    }
}
