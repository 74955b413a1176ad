//! Equal-frequency (quantile) edges.

use crate::error::{PpsError, Result};

/// Quantile cut points at `0, 1/n, …, 1` of the ranked values.
///
/// Quantiles interpolate linearly between neighbouring order statistics.
/// Cut points that coincide mean the column has too few distinct values for
/// `num_bins` bins; that is an error rather than a silent merge.
pub(super) fn edges(mut values: Vec<f64>, num_bins: usize) -> Result<Vec<f64>> {
    values.sort_by(f64::total_cmp);

    let edges: Vec<f64> = (0..=num_bins)
        .map(|k| quantile(&values, k, num_bins))
        .collect();

    if let Some(pair) = edges.windows(2).find(|w| w[0] >= w[1]) {
        return Err(PpsError::Binning(format!(
            "Duplicate quantile cut point {}: the column has too few distinct values for {} bins",
            pair[1], num_bins
        )));
    }
    Ok(edges)
}

/// The `k/n` quantile of sorted, non-empty `values`.
fn quantile(sorted: &[f64], k: usize, n: usize) -> f64 {
    let last = sorted.len() - 1;
    // Position (last * k / n) split into whole and fractional parts without
    // going through a rounded float ratio.
    let scaled = last * k;
    let lower = scaled / n;
    let frac = (scaled % n) as f64 / n as f64;
    if lower >= last || frac == 0.0 {
        return sorted[lower.min(last)];
    }
    sorted[lower] + (sorted[lower + 1] - sorted[lower]) * frac
}
