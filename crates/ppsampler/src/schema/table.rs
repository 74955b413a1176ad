//! Table-level schema inference.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::column::{ColumnSchema, NumericSummary};
use super::types::ColumnType;
use crate::error::{PpsError, Result};
use crate::input::DataTable;

static INTEGER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+$").expect("valid integer pattern"));

static FLOAT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").expect("valid float pattern")
});

/// Schema for an entire table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableSchema {
    /// Schemas for each column, in table order.
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    /// Classify every column of `table`.
    pub fn infer(table: &DataTable) -> Self {
        let columns = table
            .headers
            .iter()
            .enumerate()
            .map(|(position, name)| infer_column(table, name, position))
            .collect();
        Self { columns }
    }

    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Numeric columns and their summaries, in table order.
    pub fn numeric_columns(&self) -> IndexMap<String, NumericSummary> {
        self.columns
            .iter()
            .filter_map(|c| c.numeric.clone().map(|s| (c.name.clone(), s)))
            .collect()
    }

    /// Fail with [`PpsError::NoNumericColumns`] unless at least one column is numeric.
    pub fn ensure_numeric_columns(&self) -> Result<()> {
        if self.columns.iter().any(|c| c.is_numeric()) {
            Ok(())
        } else {
            Err(PpsError::NoNumericColumns)
        }
    }

    /// Look up a column that must exist and be numeric.
    pub fn require_numeric(&self, name: &str) -> Result<&ColumnSchema> {
        self.ensure_numeric_columns()?;
        let column = self
            .get_column(name)
            .ok_or_else(|| PpsError::ColumnNotFound(name.to_string()))?;
        if !column.is_numeric() {
            return Err(PpsError::NonNumericColumn(name.to_string()));
        }
        Ok(column)
    }
}

fn infer_column(table: &DataTable, name: &str, position: usize) -> ColumnSchema {
    let mut schema = ColumnSchema::new(name, position);
    let mut all_integer = true;
    let mut values = Vec::new();

    for raw in table.column_values(position) {
        if DataTable::is_null_value(raw) {
            schema.null_count += 1;
            continue;
        }
        let trimmed = raw.trim();
        if !FLOAT_PATTERN.is_match(trimmed) {
            schema.inferred_type = ColumnType::String;
            return schema;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => values.push(v),
            _ => {
                schema.inferred_type = ColumnType::String;
                return schema;
            }
        }
        all_integer &= INTEGER_PATTERN.is_match(trimmed);
    }

    schema.numeric = NumericSummary::from_values(values);
    schema.inferred_type = match (&schema.numeric, all_integer) {
        (None, _) => ColumnType::Empty,
        (Some(_), true) => ColumnType::Integer,
        (Some(_), false) => ColumnType::Float,
    };
    schema
}
