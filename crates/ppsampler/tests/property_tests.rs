//! Property-based tests for the sampling engine.
//!
//! These tests use proptest to generate random columns and weights and check
//! the invariants every run must keep:
//! 1. **Normalization**: probabilities always sum to one
//! 2. **Exclusion**: rows outside the population are never drawn
//! 3. **Determinism**: same input and seed, same sample
//! 4. **Coverage**: every non-null value lands in exactly one bin
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p ppsampler --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p ppsampler --test property_tests
//! ```

use std::collections::HashSet;

use proptest::prelude::*;

use ppsampler::{BinningEngine, BinningStrategy, Sampler, WeightAssigner, WeightTable};

// =============================================================================
// Test Strategies
// =============================================================================

/// A column of finite values with occasional nulls.
fn column() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(
        prop_oneof![
            1 => Just(None),
            8 => (-1000.0f64..1000.0).prop_map(Some),
        ],
        1..200,
    )
}

/// Strictly positive weights.
fn positive_weights() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.001f64..1000.0, 1..150)
}

// =============================================================================
// Weight Assignment Properties
// =============================================================================

mod weighting_tests {
    use super::*;

    proptest! {
        /// Automatic probabilities sum to one and skip null/non-positive rows.
        #[test]
        fn automatic_normalizes(values in column()) {
            let expected: Vec<usize> = values
                .iter()
                .enumerate()
                .filter(|(_, v)| matches!(v, Some(x) if *x > 0.0))
                .map(|(i, _)| i)
                .collect();

            match WeightAssigner::automatic("x", &values) {
                Ok(probs) => {
                    prop_assert_eq!(&probs.rows, &expected);
                    prop_assert!((probs.total() - 1.0).abs() < 1e-9);
                    prop_assert!(probs.probabilities.iter().all(|p| (0.0..=1.0).contains(p)));
                }
                Err(_) => prop_assert!(expected.is_empty()),
            }
        }

        /// Binned probabilities sum to one for any non-zero weight vector.
        #[test]
        fn binned_normalizes(
            values in column(),
            num_bins in 2usize..6,
            raw_weights in prop::collection::vec(0.0f64..10.0, 6),
        ) {
            let strategy = BinningStrategy::EqualWidth { num_bins };
            if let Ok(binning) = BinningEngine::bin(&values, &strategy) {
                let weights = WeightTable::for_binning(&binning, Some(&raw_weights[..num_bins])).unwrap();
                if let Ok(probs) = WeightAssigner::binned("x", &binning, &weights) {
                    prop_assert!((probs.total() - 1.0).abs() < 1e-9);
                    prop_assert_eq!(probs.len(), binning.binned_row_count());
                }
            }
        }
    }
}

// =============================================================================
// Binning Properties
// =============================================================================

mod binning_tests {
    use super::*;

    proptest! {
        /// Every non-null value falls in exactly one bin, and that bin contains it.
        #[test]
        fn bins_cover_every_value(values in column(), num_bins in 2usize..8) {
            for strategy in [
                BinningStrategy::EqualWidth { num_bins },
                BinningStrategy::EqualFrequency { num_bins },
            ] {
                if let Ok(binning) = BinningEngine::bin(&values, &strategy) {
                    prop_assert_eq!(binning.bin_count(), num_bins);
                    for (row, value) in values.iter().enumerate() {
                        match value {
                            Some(v) => {
                                let bin = binning.bin_of(row);
                                prop_assert!(bin.is_some());
                                let bin = bin.unwrap();
                                prop_assert!(bin.contains(*v));
                                let holders = binning.bins.iter().filter(|b| b.contains(*v)).count();
                                prop_assert_eq!(holders, 1);
                            }
                            None => prop_assert!(binning.bin_of(row).is_none()),
                        }
                    }
                }
            }
        }

        /// Bin edges are strictly ascending and ordinals run 1..=n.
        #[test]
        fn bins_are_ordered(values in column(), num_bins in 2usize..8) {
            if let Ok(binning) = BinningEngine::bin(&values, &BinningStrategy::EqualFrequency { num_bins }) {
                for (i, bin) in binning.bins.iter().enumerate() {
                    prop_assert_eq!(bin.ordinal, i + 1);
                    prop_assert!(bin.low < bin.high);
                }
                for pair in binning.bins.windows(2) {
                    prop_assert_eq!(pair[0].high, pair[1].low);
                }
            }
        }
    }
}

// =============================================================================
// Sampler Properties
// =============================================================================

mod sampler_tests {
    use super::*;

    proptest! {
        /// Samples are distinct, in range, and of the requested size.
        #[test]
        fn sample_is_distinct(weights in positive_weights(), seed in any::<u64>(), frac in 0.0f64..1.0) {
            let size = ((weights.len() as f64 * frac) as usize).max(1);
            let picked = Sampler::with_seed(seed).sample(&weights, size).unwrap();

            prop_assert_eq!(picked.len(), size);
            prop_assert!(picked.iter().all(|&p| p < weights.len()));
            let unique: HashSet<_> = picked.iter().collect();
            prop_assert_eq!(unique.len(), size);
        }

        /// Same seed and weights, same sample.
        #[test]
        fn sample_is_deterministic(weights in positive_weights(), seed in any::<u64>()) {
            let size = weights.len().div_ceil(2);
            let a = Sampler::with_seed(seed).sample(&weights, size).unwrap();
            let b = Sampler::with_seed(seed).sample(&weights, size).unwrap();
            prop_assert_eq!(a, b);
        }

        /// Drawing everything returns every drawable position once.
        #[test]
        fn full_sample_is_permutation(weights in positive_weights(), seed in any::<u64>()) {
            let mut picked = Sampler::with_seed(seed).sample(&weights, weights.len()).unwrap();
            picked.sort_unstable();
            prop_assert_eq!(picked, (0..weights.len()).collect::<Vec<_>>());
        }

        /// Oversized requests are rejected, never clamped.
        #[test]
        fn oversized_sample_rejected(weights in positive_weights(), extra in 1usize..10) {
            prop_assert!(Sampler::new().sample(&weights, weights.len() + extra).is_err());
        }
    }
}
