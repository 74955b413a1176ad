//! Per-invocation sampling parameters.

use serde::{Deserialize, Serialize};

use crate::binning::BinningStrategy;

/// How probabilities are derived from the selected column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    /// Probability proportional to the value itself.
    Automatic,
    /// Probability proportional to the weight of the value's bin.
    Binned(BinningStrategy),
}

impl SamplingMode {
    pub fn name(&self) -> &'static str {
        match self {
            SamplingMode::Automatic => "automatic",
            SamplingMode::Binned(strategy) => strategy.name(),
        }
    }

    pub fn strategy(&self) -> Option<&BinningStrategy> {
        match self {
            SamplingMode::Automatic => None,
            SamplingMode::Binned(strategy) => Some(strategy),
        }
    }
}

/// Everything one sampling run needs, fixed at construction.
///
/// A request is rebuilt for every run; nothing carries over between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingRequest {
    /// Numeric column that drives selection.
    pub column: String,
    pub mode: SamplingMode,
    /// One label per bin in ascending order (binned modes only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// One weight per bin in ascending order (binned modes only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<f64>>,
    pub sample_size: usize,
    /// Overrides the sampler's configured seed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SamplingRequest {
    /// Sample proportional to the values of `column`.
    pub fn automatic(column: impl Into<String>, sample_size: usize) -> Self {
        Self::new(column, SamplingMode::Automatic, sample_size)
    }

    /// Sample proportional to per-bin weights.
    pub fn binned(column: impl Into<String>, strategy: BinningStrategy, sample_size: usize) -> Self {
        Self::new(column, SamplingMode::Binned(strategy), sample_size)
    }

    pub fn new(column: impl Into<String>, mode: SamplingMode, sample_size: usize) -> Self {
        Self {
            column: column.into(),
            mode,
            labels: None,
            weights: None,
            sample_size,
            seed: None,
        }
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn is_binned(&self) -> bool {
        matches!(self.mode, SamplingMode::Binned(_))
    }
}
