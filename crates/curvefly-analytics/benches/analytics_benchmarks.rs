//! Benchmarks for the factor fit and the butterfly signal.
//!
//! Run with: cargo bench -p curvefly-analytics

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use curvefly_analytics::prelude::*;
use curvefly_core::{Date, Tenor, YieldTable};

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn create_test_curve(days: usize) -> YieldTable {
    let start = Date::from_ymd(2005, 1, 3).unwrap();
    let dates = (0..days)
        .map(|i| start.add_business_days(i as i32))
        .collect();
    let rows = (0..days)
        .map(|i| {
            let t = i as f64;
            vec![
                2.0 + 0.8 * (t / 150.0).sin() + 0.02 * (t * 1.7).cos(),
                2.4 + 0.7 * (t / 160.0).sin() + 0.02 * (t * 2.3).sin(),
                2.8 + 0.6 * (t / 170.0).sin() + 0.02 * (t * 0.9).cos(),
                3.1 + 0.5 * (t / 180.0).sin() + 0.02 * (t * 3.1).sin(),
            ]
        })
        .collect();

    YieldTable::new(
        dates,
        vec![
            Tenor::Years(2),
            Tenor::Years(5),
            Tenor::Years(10),
            Tenor::Years(30),
        ],
        rows,
    )
    .unwrap()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_factor_fit(c: &mut Criterion) {
    let model = FactorModel::new(FactorModelConfig::default()).unwrap();
    let mut group = c.benchmark_group("factor_fit");

    for days in &[1_260, 5_040] {
        let changes = create_test_curve(*days).changes();
        group.throughput(Throughput::Elements(*days as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), &changes, |b, changes| {
            b.iter(|| model.decompose(black_box(changes)))
        });
    }
    group.finish();
}

fn bench_butterfly_signal(c: &mut Criterion) {
    let engine = ButterflyEngine::new(ButterflyConfig::default()).unwrap();
    let mut group = c.benchmark_group("butterfly_signal");

    for days in &[1_260, 5_040] {
        let yields = create_test_curve(*days);
        group.throughput(Throughput::Elements(*days as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), &yields, |b, yields| {
            b.iter(|| engine.run(black_box(yields)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_factor_fit, bench_butterfly_signal);
criterion_main!(benches);
