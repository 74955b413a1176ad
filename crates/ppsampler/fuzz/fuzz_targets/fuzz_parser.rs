//! Fuzz target for the data loader and column typing.
//!
//! Arbitrary bytes must either parse or fail with an error; whatever parses
//! must survive schema inference.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ppsampler::{Parser, TableSchema};

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok(table) = Parser::new().parse_bytes(data) {
        let schema = TableSchema::infer(&table);
        let _ = schema.numeric_columns();
    }
});
