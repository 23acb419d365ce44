//! Engine benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use liver_simulator_x::scenario::{BaselineScenario, DkaScenario};
use liver_simulator_x::{FeedbackContext, HepaticEngine, HistoryRecord, LiverPathways, MetabolicState};

fn bench_single_step(c: &mut Criterion) {
    let mut engine = HepaticEngine::default();
    let mut state = engine.new_state();

    c.bench_function("single_step", |b| {
        b.iter(|| engine.step(black_box(&mut state)))
    });
}

fn bench_guard_scan(c: &mut Criterion) {
    let pathways = LiverPathways::standard();
    let state = MetabolicState::default();
    let ctx = FeedbackContext::neutral();

    c.bench_function("guard_scan", |b| {
        b.iter(|| pathways.active_rules(black_box(&state), black_box(&ctx)))
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let state = MetabolicState::default();

    c.bench_function("history_snapshot", |b| {
        b.iter(|| HistoryRecord::from_state(black_box(&state), 0.0))
    });
}

fn bench_baseline_run(c: &mut Criterion) {
    let scenario = BaselineScenario::new();

    c.bench_function("baseline_200_ticks", |b| {
        b.iter(|| HepaticEngine::default().run(black_box(&scenario), 200))
    });
}

fn bench_dka_run(c: &mut Criterion) {
    let scenario = DkaScenario::new();

    c.bench_function("dka_1440_ticks", |b| {
        b.iter(|| HepaticEngine::default().run(black_box(&scenario), 1440))
    });
}

criterion_group!(
    benches,
    bench_single_step,
    bench_guard_scan,
    bench_snapshot,
    bench_baseline_run,
    bench_dka_run
);
criterion_main!(benches);
