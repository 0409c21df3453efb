//! Comparison against the published tables for the muon channel.
//!
//! These assertions pin the shipped form-factor snapshot to the literature
//! values. They are ignored by default: re-enabling them requires
//! cross-checking the snapshot in `bsl-ff` against the published correlated
//! fit, coefficient by coefficient, since small shifts of the central values
//! move the tabulated observables by more than their quoted tolerances.

use bsl_core::{CoefficientPoint, CpState, ParameterPoint};
use bsl_ff::lattice_load_nominal;
use bsl_inputs::{sm_coefficients, ParameterStore};
use bsl_registry::ObservableRegistry;

fn nominal_point() -> ParameterPoint {
    lattice_load_nominal(ParameterStore::defaults())
        .set_constraint("Vcb", 0.04175)
        .set_constraint("gamma", 1.30)
        .set_constraint("tau_Lambdab", 1.0 / 4.49e-13)
        .set_constraint("Lambda->ppi alpha_-", 0.642)
        .set_constraint("Lambdab polarisation", 1.00)
        .freeze()
}

fn assert_close(
    registry: &ObservableRegistry,
    params: &ParameterPoint,
    wc: &CoefficientPoint,
    name: &str,
    q2min: f64,
    q2max: f64,
    target: f64,
    delta: f64,
    scale: f64,
) {
    let value = registry
        .predict_central(name, params, wc, q2min, q2max, CpState::Particle)
        .expect(name)
        .value
        * scale;
    assert!(
        (value - target).abs() < delta,
        "{name} [{q2min}, {q2max}]: {value} vs {target} +- {delta}"
    );
}

#[test]
#[ignore = "requires the published correlated-fit snapshot for the form factors"]
fn branching_ratio_and_asymmetries_match_the_tables() {
    let registry = ObservableRegistry::with_defaults();
    let params = nominal_point();
    let wc = sm_coefficients();
    let mumu = |name: &str, q2min: f64, q2max: f64, target: f64, delta: f64, scale: f64| {
        assert_close(&registry, &params, &wc, name, q2min, q2max, target, delta, scale);
    };
    mumu("<dBR/dq2>(Lambdab->Lambdamumu)", 0.1, 2.0, 0.25, 0.01, 1e7);
    mumu("<dBR/dq2>(Lambdab->Lambdamumu)", 2.0, 4.0, 0.18, 0.005, 1e7);
    mumu("<dBR/dq2>(Lambdab->Lambdamumu)", 15.0, 20.0, 0.756, 0.003, 1e7);
    mumu("<dBR/dq2>(Lambdab->Lambdamumu)", 18.0, 20.0, 0.665, 0.002, 1e7);
    mumu("<FL>(Lambdab->Lambdamumu)", 4.0, 6.0, 0.808, 0.007, 1.0);
    mumu("<FL>(Lambdab->Lambdamumu)", 15.0, 20.0, 0.409, 0.002, 1.0);
    mumu("<AFBl>(Lambdab->Lambdamumu)", 4.0, 6.0, -0.062, 0.005, 1.0);
    mumu("<AFBl>(Lambdab->Lambdamumu)", 15.0, 20.0, -0.350, 0.002, 1.0);
    mumu("<AFBh>(Lambdab->Lambdamumu)", 4.0, 6.0, -0.311, 0.005, 1.0);
    mumu("<AFBh>(Lambdab->Lambdamumu)", 15.0, 20.0, -0.2710, 0.002, 1.0);
    mumu("<AFBlh>(Lambdab->Lambdamumu)", 4.0, 6.0, 0.021, 0.005, 1.0);
    mumu("<AFBlh>(Lambdab->Lambdamumu)", 15.0, 20.0, 0.1398, 0.002, 1.0);
}

#[test]
#[ignore = "requires the published correlated-fit snapshot for the form factors"]
fn polarized_angular_coefficients_match_the_tables() {
    let registry = ObservableRegistry::with_defaults();
    let params = nominal_point();
    let wc = sm_coefficients();
    let mumu = |name: &str, q2min: f64, q2max: f64, target: f64, delta: f64| {
        assert_close(&registry, &params, &wc, name, q2min, q2max, target, delta, 1.0);
    };
    mumu("<K1ss>(Lambdab->Lambdamumu)", 1.0, 6.0, 0.459, 0.003);
    mumu("<K1cc>(Lambdab->Lambdamumu)", 1.0, 6.0, 0.081, 0.007);
    mumu("<K2ss>(Lambdab->Lambdamumu)", 1.0, 6.0, -0.280, 0.002);
    mumu("<K2cc>(Lambdab->Lambdamumu)", 1.0, 6.0, -0.045, 0.011);
    mumu("<K27>(Lambdab->Lambdamumu)", 1.0, 6.0, 0.089, 0.003);
    mumu("<K1ss>(Lambdab->Lambdamumu)", 15.0, 20.0, 0.351, 0.002);
    mumu("<K1cc>(Lambdab->Lambdamumu)", 15.0, 20.0, 0.298, 0.003);
    mumu("<K1c>(Lambdab->Lambdamumu)", 15.0, 20.0, -0.236, 0.004);
    mumu("<K2ss>(Lambdab->Lambdamumu)", 15.0, 20.0, -0.195, 0.001);
    mumu("<K2cc>(Lambdab->Lambdamumu)", 15.0, 20.0, -0.154, 0.002);
    mumu("<K2c>(Lambdab->Lambdamumu)", 15.0, 20.0, 0.187, 0.002);
    mumu("<K27>(Lambdab->Lambdamumu)", 15.0, 20.0, 0.221, 0.001);
    mumu("<K28>(Lambdab->Lambdamumu)", 15.0, 20.0, -0.187, 0.001);
}
