//! # Fuzzy Control Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rov_lib::fuzzy_ctrl::{FuzzyCtrl, Params};

fn fuzzy_ctrl_benchmark(c: &mut Criterion) {
    let mut ctrl = FuzzyCtrl::new(Params::default()).unwrap();

    c.bench_function("fuzzy_ctrl explicit rate", |b| {
        b.iter(|| ctrl.update_at(black_box(0.0), black_box(0.6), black_box(Some(-0.2)), black_box(0.4)))
    });

    // Derived rates, stepping the time on each tick
    let mut time_s = 0.0;
    c.bench_function("fuzzy_ctrl derived rate", |b| {
        b.iter(|| {
            time_s += 0.05;
            ctrl.update_at(time_s, black_box(0.6), None, black_box(-0.9))
        })
    });
}

criterion_group!(benches, fuzzy_ctrl_benchmark);
criterion_main!(benches);
