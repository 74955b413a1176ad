//! Column typing: which columns can drive sampling.

mod column;
mod table;
mod types;

pub use column::{ColumnSchema, NumericSummary};
pub use table::TableSchema;
pub use types::ColumnType;
