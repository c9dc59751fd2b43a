// SPDX-License-Identifier: MPL-2.0

use criterion::{criterion_group, criterion_main, Criterion};
use random_events::{CompositeSet, Interval, SimpleInterval};

/// A synthetic, moderately-sized union of half-open intervals, half of which
/// touch their neighbor and should collapse under `simplify`.
fn synthetic_intervals(count: i64) -> Interval<i64> {
    let mut composite = Interval::empty();
    for i in 0..count {
        let lower = i * 2;
        let upper = lower + 3;
        composite = composite.add_new_simple_set(SimpleInterval::closed_open(lower, upper));
    }
    composite
}

fn make_disjoint_benchmark(c: &mut Criterion) {
    let composite = synthetic_intervals(200);
    c.bench_function("interval_make_disjoint_200", |b| {
        b.iter(|| composite.make_disjoint())
    });
}

fn simplify_benchmark(c: &mut Criterion) {
    let composite = synthetic_intervals(200).make_disjoint();
    c.bench_function("interval_simplify_200", |b| b.iter(|| composite.simplify()));
}

criterion_group!(benches, make_disjoint_benchmark, simplify_benchmark);
criterion_main!(benches);
