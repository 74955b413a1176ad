//! Fuzz target for user-typed request text.
//!
//! Cutoff, label and weight strings come straight from the user. Any input
//! must end in a sample or a typed error, never a panic.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ppsampler::{
    BinningStrategy, Parser, PpsSampler, SamplingRequest, parse_cutoffs, parse_labels,
    parse_weights,
};

#[derive(Debug, Arbitrary)]
struct Input {
    values: Vec<i16>,
    num_bins: u8,
    strategy: u8,
    cutoffs: String,
    labels: String,
    weights: String,
    sample_size: u8,
}

fuzz_target!(|input: Input| {
    let mut csv = String::from("v\n");
    for v in input.values.iter().take(500) {
        csv.push_str(&format!("{}\n", v));
    }
    let Ok(table) = Parser::new().parse_str(&csv) else {
        return;
    };

    let num_bins = input.num_bins as usize;
    let strategy = match input.strategy % 3 {
        0 => BinningStrategy::EqualWidth { num_bins },
        1 => BinningStrategy::EqualFrequency { num_bins },
        _ => match parse_cutoffs(&input.cutoffs) {
            Ok(cutoffs) => BinningStrategy::ManualCutoff { num_bins, cutoffs },
            Err(_) => return,
        },
    };

    let labels = parse_labels(&input.labels);
    let mut request = SamplingRequest::binned("v", strategy, input.sample_size as usize);
    if !labels.is_empty() {
        request = request.with_labels(labels);
    }
    if let Ok(weights) = parse_weights(&input.weights) {
        if !weights.is_empty() {
            request = request.with_weights(weights);
        }
    }

    if let Ok(result) = PpsSampler::new().sample(&table, &request) {
        assert_eq!(result.len(), input.sample_size as usize);
        let _ = result.to_csv();
    }
});
