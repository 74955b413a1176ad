//! Parsing comma-separated user input into typed lists.
//!
//! Each list is parsed once, here, so nothing downstream ever sees raw text.

use crate::error::{PpsError, Result};

/// Split on commas and trim each token. Blank tokens are dropped, so
/// `"a, ,b"` yields two labels and a count check catches the gap.
pub fn parse_labels(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse comma-separated weights. Every token must be a finite real number.
pub fn parse_weights(input: &str) -> Result<Vec<f64>> {
    parse_numbers(input, |token| PpsError::InvalidWeightFormat { token })
}

/// Parse comma-separated cutoff points.
pub fn parse_cutoffs(input: &str) -> Result<Vec<f64>> {
    parse_numbers(input, |token| PpsError::InvalidCutoffFormat { token })
}

fn parse_numbers(input: &str, invalid: impl Fn(String) -> PpsError) -> Result<Vec<f64>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    input
        .split(',')
        .map(str::trim)
        .map(|token| match token.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(invalid(token.to_string())),
        })
        .collect()
}
