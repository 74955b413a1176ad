//! Equal-width edges.

use super::ensure_ascending;
use crate::error::{PpsError, Result};

/// Split `[min, max]` into `num_bins` intervals of identical length.
///
/// The top edge is pinned to `max` so accumulated rounding never leaves the
/// maximum outside the last bin.
pub(super) fn edges(min: f64, max: f64, num_bins: usize) -> Result<Vec<f64>> {
    if max <= min {
        return Err(PpsError::Binning(format!(
            "All values are identical ({}); equal-width bins need a non-zero range",
            min
        )));
    }

    let step = (max - min) / num_bins as f64;
    let mut edges: Vec<f64> = (0..num_bins).map(|i| min + step * i as f64).collect();
    edges.push(max);

    ensure_ascending(&edges, "Equal-width bin edges")?;
    Ok(edges)
}
