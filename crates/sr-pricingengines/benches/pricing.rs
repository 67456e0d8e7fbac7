//! Criterion benchmarks for closed-form option pricing.
//!
//! Run with: cargo bench -p sr-pricingengines

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sr_models::{ModelParameters, PricingContext};
use sr_pricingengines::{CapletFloorletPricer, ForwardOptionPricer};

fn params() -> ModelParameters {
    ModelParameters::new(0.10, 0.09, 0.2, 0.05).unwrap()
}

/// Call pricing as the volatility grid is refined.
fn bench_forward_option(c: &mut Criterion) {
    let mut group = c.benchmark_group("forward_option");
    let pricer = ForwardOptionPricer::new(params(), PricingContext::new(0.0, 1.25).unwrap());
    for dt in [0.01, 0.001, 0.0001] {
        group.bench_with_input(BenchmarkId::new("call", dt), &dt, |b, &dt| {
            b.iter(|| black_box(pricer.call_price(black_box(0.5), black_box(1.0), dt).unwrap()));
        });
    }
    group.finish();
}

/// Single caplets and quarterly cap strips of growing length.
fn bench_caplet(c: &mut Criterion) {
    let mut group = c.benchmark_group("caplet");
    let pricer = CapletFloorletPricer::new(params(), PricingContext::new(0.0, 0.04).unwrap());

    group.bench_function("caplet_6m", |b| {
        b.iter(|| black_box(pricer.caplet(black_box(0.5), black_box(1.0), 0.01).unwrap()));
    });

    for years in [1usize, 5, 10] {
        let resets: Vec<f64> = (1..=4 * years + 1).map(|i| 0.25 * i as f64).collect();
        group.bench_with_input(BenchmarkId::new("cap_quarterly", years), &resets, |b, resets| {
            b.iter(|| black_box(pricer.cap(resets, 0.01).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_forward_option, bench_caplet);
criterion_main!(benches);
