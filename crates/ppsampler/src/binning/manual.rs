//! Manual-cutoff edges.

use super::ensure_ascending;
use crate::error::{PpsError, Result};

/// Amount added above the observed maximum so the top bin includes it.
pub const TOP_EDGE_NUDGE: f64 = 0.01;

/// Build `[min, cutoffs…, max + nudge]` from user breakpoints.
pub(super) fn edges(min: f64, max: f64, num_bins: usize, cutoffs: &[f64]) -> Result<Vec<f64>> {
    if cutoffs.len() != num_bins - 1 {
        return Err(PpsError::Binning(format!(
            "You must provide exactly {} breakpoints, got {}",
            num_bins - 1,
            cutoffs.len()
        )));
    }
    if cutoffs.iter().any(|c| !c.is_finite()) {
        return Err(PpsError::Binning(format!(
            "Breakpoints must be finite numbers: {:?}",
            cutoffs
        )));
    }
    ensure_ascending(cutoffs, "Breakpoints")?;

    let mut edges = Vec::with_capacity(num_bins + 1);
    edges.push(min);
    edges.extend_from_slice(cutoffs);
    edges.push(max + TOP_EDGE_NUDGE);

    ensure_ascending(&edges, "Bin edges (column minimum, breakpoints, column maximum)")?;
    Ok(edges)
}
