//! Sampled rows, their display projection, and CSV export.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PpsError, Result};
use crate::input::DataTable;
use crate::pipeline::PreparedPopulation;
use crate::weighting::BinSummary;

/// Name of the derived probability column.
pub const PROBABILITY_COLUMN: &str = "probability";

/// One drawn row with its derived values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledRow {
    /// Position of the row in the source table.
    pub row_index: usize,
    /// Original cells, in source column order.
    pub values: Vec<String>,
    /// Interval of the row's bin (binned modes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin_range: Option<String>,
    /// Label of the row's bin (binned modes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin_label: Option<String>,
    pub probability: f64,
}

/// A small column-selected view of a sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Outcome of one sampling run. Never modified after it is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleResult {
    /// Column that drove selection.
    pub column: String,
    /// Mode name (`automatic`, `equal-width`, ...).
    pub mode: String,
    pub seed: u64,
    /// Rows eligible for selection.
    pub population_size: usize,
    /// Headers of the source table.
    pub source_headers: Vec<String>,
    /// Drawn rows, in draw order.
    pub rows: Vec<SampledRow>,
    /// Bin table (empty in automatic mode).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bins: Vec<BinSummary>,
    binned: bool,
    column_index: usize,
}

impl SampleResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_binned(&self) -> bool {
        self.binned
    }

    /// Source row positions in draw order.
    pub fn row_indices(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.row_index).collect()
    }

    /// Name of the bin label column, e.g. `revenue_bin`.
    pub fn bin_column(&self) -> Option<String> {
        self.binned.then(|| format!("{}_bin", self.column))
    }

    /// Name of the bin interval column, e.g. `revenue_range`.
    pub fn range_column(&self) -> Option<String> {
        self.binned.then(|| format!("{}_range", self.column))
    }

    /// Selected column, bin label (binned modes) and probability, in that order.
    pub fn projection(&self) -> Projection {
        let mut headers = vec![self.column.clone()];
        headers.extend(self.bin_column());
        headers.push(PROBABILITY_COLUMN.to_string());

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut cells = vec![row.values[self.column_index].clone()];
                if self.binned {
                    cells.push(row.bin_label.clone().unwrap_or_default());
                }
                cells.push(row.probability.to_string());
                cells
            })
            .collect();

        Projection { headers, rows }
    }

    /// The first `n` rows of the projection.
    pub fn preview(&self, n: usize) -> Projection {
        let mut projection = self.projection();
        projection.rows.truncate(n);
        projection
    }

    /// Every source column, then the bin interval and label, then probability.
    pub fn export_headers(&self) -> Vec<String> {
        let mut headers = self.source_headers.clone();
        headers.extend(self.range_column());
        headers.extend(self.bin_column());
        headers.push(PROBABILITY_COLUMN.to_string());
        headers
    }

    /// Serialize the full sampled row set as comma-separated UTF-8.
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(self.export_headers())?;

        for row in &self.rows {
            let mut record = row.values.clone();
            if self.binned {
                record.push(row.bin_range.clone().unwrap_or_default());
                record.push(row.bin_label.clone().unwrap_or_default());
            }
            record.push(row.probability.to_string());
            writer.write_record(&record)?;
        }

        writer.into_inner().map_err(|e| PpsError::Io {
            path: PathBuf::from("<csv output>"),
            source: e.into_error(),
        })
    }

    /// Write [`to_csv`](Self::to_csv) output to a file.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_csv()?;
        std::fs::write(path, bytes).map_err(|e| PpsError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Builds a [`SampleResult`] from drawn population positions.
pub struct ResultProjector;

impl ResultProjector {
    /// `drawn` holds positions into the population, in draw order.
    pub fn project(
        table: &DataTable,
        population: &PreparedPopulation,
        drawn: &[usize],
        seed: u64,
    ) -> SampleResult {
        let probabilities = &population.probabilities;
        let rows = drawn
            .iter()
            .map(|&pos| {
                let row_index = probabilities.rows[pos];
                let bin = population
                    .binning
                    .as_ref()
                    .and_then(|b| b.bin_of(row_index));
                SampledRow {
                    row_index,
                    values: table.rows[row_index].clone(),
                    bin_range: bin.map(|b| b.range.clone()),
                    bin_label: bin.map(|b| b.label.clone()),
                    probability: probabilities.probabilities[pos],
                }
            })
            .collect();

        SampleResult {
            column: population.column.clone(),
            mode: population.mode.name().to_string(),
            seed,
            population_size: probabilities.len(),
            source_headers: table.headers.clone(),
            rows,
            bins: population.bins.clone(),
            binned: population.binning.is_some(),
            column_index: population.column_index,
        }
    }
}
