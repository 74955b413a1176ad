//! Column type classification.

use serde::{Deserialize, Serialize};

/// Inferred data type for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Whole numbers (no decimal point or exponent).
    Integer,
    /// Floating-point numbers.
    Float,
    /// Anything with at least one non-numeric value.
    String,
    /// Every cell is null.
    #[default]
    Empty,
}

impl ColumnType {
    /// Returns true if this type can drive PPS sampling.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnType::Integer => write!(f, "integer"),
            ColumnType::Float => write!(f, "float"),
            ColumnType::String => write!(f, "string"),
            ColumnType::Empty => write!(f, "empty"),
        }
    }
}
