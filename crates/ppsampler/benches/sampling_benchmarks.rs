//! Sampling performance benchmarks.
//!
//! Measures the A-ES draw alone and the full load-prepare-sample pipeline.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ppsampler::{BinningStrategy, Parser, PpsSampler, Sampler, SamplingRequest};

fn generate_weights(rows: usize) -> Vec<f64> {
    (0..rows).map(|i| 1.0 + (i % 101) as f64).collect()
}

/// Generate a CSV with an id, a category and a numeric size column.
fn generate_csv(rows: usize) -> String {
    let mut data = String::from("id,category,size\n");
    for row in 0..rows {
        data.push_str(&format!("R{:06},cat{},{}\n", row, row % 7, 10 + (row * 31) % 5_000));
    }
    data
}

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw");

    for rows in [1_000, 10_000, 100_000].iter() {
        let weights = generate_weights(*rows);
        group.throughput(Throughput::Elements(*rows as u64));

        for fraction in [0.01, 0.5] {
            let size = ((*rows as f64) * fraction) as usize;
            group.bench_with_input(
                BenchmarkId::new(format!("sample_{}pct", (fraction * 100.0) as usize), rows),
                &weights,
                |b, weights| b.iter(|| Sampler::new().sample(black_box(weights), size).unwrap()),
            );
        }
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for rows in [1_000, 10_000].iter() {
        let table = Parser::new().parse_str(&generate_csv(*rows)).unwrap();
        let sampler = PpsSampler::new();
        let requests = [
            SamplingRequest::automatic("size", rows / 10),
            SamplingRequest::binned("size", BinningStrategy::EqualFrequency { num_bins: 4 }, rows / 10)
                .with_weights(vec![1.0, 1.5, 2.0, 4.0]),
        ];

        group.throughput(Throughput::Elements(*rows as u64));
        for request in requests {
            group.bench_with_input(
                BenchmarkId::new(request.mode.name(), rows),
                &table,
                |b, table| b.iter(|| sampler.sample(black_box(table), &request).unwrap()),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_draw, bench_pipeline);
criterion_main!(benches);
