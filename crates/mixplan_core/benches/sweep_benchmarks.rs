//! Criterion benchmarks for mixplan_core
//!
//! Run with: cargo bench -p mixplan_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use mixplan_core::analysis::{SweepDimension, SweepSpec, evaluate_sweep};
use mixplan_core::capacity::evaluate;
use mixplan_core::config::presets;
use mixplan_core::model::ParameterField;

fn bench_single_evaluation(c: &mut Criterion) {
    let params = presets::reference();
    c.bench_function("evaluate_reference", |b| {
        b.iter(|| evaluate(black_box(&params)))
    });
}

fn bench_preset_sweeps(c: &mut Criterion) {
    let mut group = c.benchmark_group("preset_sweeps");

    let consensus = presets::consensus_interval_sweep();
    group.bench_function("consensus_interval_collected", |b| {
        b.iter(|| evaluate_sweep(black_box(&consensus)))
    });
    group.bench_function("consensus_interval_lazy", |b| {
        b.iter(|| black_box(&consensus).rows().filter(|r| r.is_ok()).count())
    });

    group.finish();
}

fn bench_grid_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_size");

    for steps in [10usize, 50, 100].iter() {
        let spec = SweepSpec::new(presets::reference())
            .dimension(SweepDimension::linear(
                ParameterField::NoiseSignal,
                0.0,
                99.0,
                *steps,
            ))
            .dimension(SweepDimension::geometric(
                ParameterField::NumClients,
                1e3,
                2.0,
                *steps,
            ));

        group.bench_with_input(BenchmarkId::new("points", steps * steps), steps, |b, _| {
            b.iter(|| evaluate_sweep(black_box(&spec)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_evaluation,
    bench_preset_sweeps,
    bench_grid_size,
);
criterion_main!(benches);
