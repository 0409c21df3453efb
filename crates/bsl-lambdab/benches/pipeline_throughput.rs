use bsl_core::CpState;
use bsl_ff::lattice_load_nominal;
use bsl_inputs::{sm_coefficients, ParameterStore};
use bsl_lambdab::{angular_at, Lepton, RegionBoundary};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn bench_angular_pipeline(c: &mut Criterion) {
    let params = lattice_load_nominal(ParameterStore::defaults())
        .set_constraint("Lambdab polarisation", 1.0)
        .freeze();
    let wc = sm_coefficients();
    let boundary = RegionBoundary::default();
    c.bench_function("angular_at_q2_6", |b| {
        b.iter(|| {
            angular_at(
                black_box(&params),
                black_box(&wc),
                black_box(6.0),
                Lepton::Mu,
                CpState::Particle,
                &boundary,
            )
            .expect("pipeline")
        })
    });
    c.bench_function("angular_at_q2_16", |b| {
        b.iter(|| {
            angular_at(
                black_box(&params),
                black_box(&wc),
                black_box(16.0),
                Lepton::Mu,
                CpState::Particle,
                &boundary,
            )
            .expect("pipeline")
        })
    });
}

criterion_group!(benches, bench_angular_pipeline);
criterion_main!(benches);
