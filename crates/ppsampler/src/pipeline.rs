//! Main sampler struct and public API.

use std::path::Path;

use indexmap::IndexMap;

use crate::binning::{Binning, BinningEngine, BinningStrategy};
use crate::error::{PpsError, Result};
use crate::input::{DataTable, Parser, ParserConfig, SourceMetadata};
use crate::projection::{ResultProjector, SampleResult};
use crate::request::{SamplingMode, SamplingRequest};
use crate::sampler::{DEFAULT_SEED, Sampler};
use crate::schema::{NumericSummary, TableSchema};
use crate::weighting::{BinSummary, ProbabilityTable, WeightAssigner, WeightTable};

/// Configuration for sampling runs.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Parser configuration used by [`PpsSampler::load`].
    pub parser: ParserConfig,
    /// Seed used when a request does not carry its own.
    pub seed: u64,
    /// Rows shown in a preview.
    pub preview_rows: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            seed: DEFAULT_SEED,
            preview_rows: 5,
        }
    }
}

impl SamplerConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }
}

/// The sampling population after the configuration pass.
#[derive(Debug, Clone)]
pub struct PreparedPopulation {
    pub column: String,
    /// Position of `column` in the source table.
    pub column_index: usize,
    pub mode: SamplingMode,
    /// Present in binned modes.
    pub binning: Option<Binning>,
    /// Present in binned modes.
    pub weights: Option<WeightTable>,
    pub probabilities: ProbabilityTable,
    /// Per-bin summary (empty in automatic mode).
    pub bins: Vec<BinSummary>,
}

impl PreparedPopulation {
    /// Rows eligible for selection.
    pub fn size(&self) -> usize {
        self.probabilities.len()
    }

    /// Rows that can actually be drawn (non-zero probability).
    pub fn drawable(&self) -> usize {
        self.probabilities.drawable_count()
    }
}

/// The PPS sampling engine.
///
/// Holds configuration only. Every call derives bins and probabilities from
/// scratch, so repeated calls with the same table and request agree.
pub struct PpsSampler {
    config: SamplerConfig,
    parser: Parser,
}

impl PpsSampler {
    /// Create a sampler with default configuration.
    pub fn new() -> Self {
        Self::with_config(SamplerConfig::default())
    }

    /// Create a sampler with custom configuration.
    pub fn with_config(config: SamplerConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Load a delimited data file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        self.parser.parse_file(path)
    }

    /// Columns that can drive sampling, with their value summaries.
    pub fn numeric_columns(&self, table: &DataTable) -> Result<IndexMap<String, NumericSummary>> {
        let schema = TableSchema::infer(table);
        schema.ensure_numeric_columns()?;
        Ok(schema.numeric_columns())
    }

    /// Bin a column without weighting or sampling, e.g. to show the bin table
    /// before weights are chosen.
    pub fn bin_column(
        &self,
        table: &DataTable,
        column: &str,
        strategy: &BinningStrategy,
        labels: Option<&[String]>,
    ) -> Result<Binning> {
        let (_, values) = numeric_values(table, column)?;
        let binning = BinningEngine::bin(&values, strategy)?;
        match labels {
            Some(labels) => binning.with_labels(labels),
            None => Ok(binning),
        }
    }

    /// Configuration pass: bin, weight and normalize.
    pub fn prepare(&self, table: &DataTable, request: &SamplingRequest) -> Result<PreparedPopulation> {
        let (column_index, values) = numeric_values(table, &request.column)?;

        match &request.mode {
            SamplingMode::Automatic => {
                if request.labels.is_some() || request.weights.is_some() {
                    return Err(PpsError::Config(
                        "Bin labels and weights only apply to binned modes".to_string(),
                    ));
                }
                let probabilities = WeightAssigner::automatic(&request.column, &values)?;
                Ok(PreparedPopulation {
                    column: request.column.clone(),
                    column_index,
                    mode: request.mode.clone(),
                    binning: None,
                    weights: None,
                    probabilities,
                    bins: Vec::new(),
                })
            }
            SamplingMode::Binned(strategy) => {
                let mut binning = BinningEngine::bin(&values, strategy)?;
                if let Some(labels) = &request.labels {
                    binning = binning.with_labels(labels)?;
                }
                let weights = WeightTable::for_binning(&binning, request.weights.as_deref())?;
                let probabilities = WeightAssigner::binned(&request.column, &binning, &weights)?;
                let bins = WeightAssigner::summarize(&binning, &weights, &probabilities);
                Ok(PreparedPopulation {
                    column: request.column.clone(),
                    column_index,
                    mode: request.mode.clone(),
                    binning: Some(binning),
                    weights: Some(weights),
                    probabilities,
                    bins,
                })
            }
        }
    }

    /// Sampling pass over an already prepared population.
    pub fn draw(
        &self,
        table: &DataTable,
        population: &PreparedPopulation,
        sample_size: usize,
        seed: Option<u64>,
    ) -> Result<SampleResult> {
        let seed = seed.unwrap_or(self.config.seed);
        let drawn = Sampler::with_seed(seed).sample(&population.probabilities.weights, sample_size)?;
        Ok(ResultProjector::project(table, population, &drawn, seed))
    }

    /// Run both passes for one request.
    pub fn sample(&self, table: &DataTable, request: &SamplingRequest) -> Result<SampleResult> {
        let population = self.prepare(table, request)?;
        self.draw(table, &population, request.sample_size, request.seed)
    }

    /// Load a file and sample it.
    pub fn sample_file(
        &self,
        path: impl AsRef<Path>,
        request: &SamplingRequest,
    ) -> Result<(SampleResult, SourceMetadata)> {
        let (table, source) = self.load(path)?;
        let result = self.sample(&table, request)?;
        Ok((result, source))
    }
}

impl Default for PpsSampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Index and per-row values of a column that must be numeric.
fn numeric_values(table: &DataTable, column: &str) -> Result<(usize, Vec<Option<f64>>)> {
    let schema = TableSchema::infer(table);
    let position = schema.require_numeric(column)?.position;
    Ok((position, table.numeric_column(position)))
}
