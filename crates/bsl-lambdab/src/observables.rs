//! Derived observables as differential numerator/denominator densities.
//!
//! Bin averaging is always a ratio of integrals over the same bin, so this
//! layer only exposes pointwise densities; the integration and the final
//! ratio live with the caller.

use bsl_core::errors::BslError;
use bsl_core::{CoefficientPoint, CpState, ParameterPoint};
use serde::{Deserialize, Serialize};

use crate::angular::{angular_coefficients, AngularCoefficients, AngularIndex, AngularInputs};
use crate::subleading::{correction, Region, RegionBoundary};
use crate::transversity_with_corrections;
use crate::Lepton;

/// Kind of derived observable, each carrying its own combination rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObservableKind {
    /// Differential branching ratio, dBR/dq².
    BranchingRatio,
    /// Longitudinal polarization fraction FL.
    LongitudinalPolarization,
    /// Leptonic forward-backward asymmetry AFBl.
    LeptonAsymmetry,
    /// Hadronic forward-backward asymmetry AFBh.
    HadronAsymmetry,
    /// Combined lepton-hadron asymmetry AFBlh.
    CombinedAsymmetry,
    /// One normalized angular coefficient ⟨Ki⟩.
    AngularCoefficient(AngularIndex),
}

impl ObservableKind {
    /// Label used inside registry keys.
    pub fn label(&self) -> String {
        match self {
            ObservableKind::BranchingRatio => "dBR/dq2".to_string(),
            ObservableKind::LongitudinalPolarization => "FL".to_string(),
            ObservableKind::LeptonAsymmetry => "AFBl".to_string(),
            ObservableKind::HadronAsymmetry => "AFBh".to_string(),
            ObservableKind::CombinedAsymmetry => "AFBlh".to_string(),
            ObservableKind::AngularCoefficient(index) => index.label().to_string(),
        }
    }
}

/// Evaluates the angular coefficient functions at one q² point, including
/// the subleading corrections of the regime the point falls into.
pub fn angular_at(
    params: &ParameterPoint,
    wc: &CoefficientPoint,
    q2: f64,
    lepton: Lepton,
    cp: CpState,
    boundary: &RegionBoundary,
) -> Result<AngularCoefficients, BslError> {
    let amps = transversity_with_corrections(params, wc, q2, lepton, cp, boundary)?;
    let m_lepton = params.get(lepton.mass_parameter())?;
    let inputs = AngularInputs {
        alpha: params.get("Lambda->ppi alpha_-")?,
        polarization: params.get("Lambdab polarisation")?,
        beta_l: (1.0 - 4.0 * m_lepton * m_lepton / q2).sqrt(),
    };
    Ok(angular_coefficients(&amps, &inputs))
}

/// Numerator density of the observable at one q² point.
pub fn numerator_density(
    kind: ObservableKind,
    params: &ParameterPoint,
    coeffs: &AngularCoefficients,
) -> Result<f64, BslError> {
    Ok(match kind {
        ObservableKind::BranchingRatio => params.get("tau_Lambdab")? * coeffs.rate(),
        ObservableKind::LongitudinalPolarization => {
            2.0 * coeffs.get(AngularIndex::K1ss) - coeffs.get(AngularIndex::K1cc)
        }
        ObservableKind::LeptonAsymmetry => 1.5 * coeffs.get(AngularIndex::K1c),
        ObservableKind::HadronAsymmetry => {
            coeffs.get(AngularIndex::K2ss) + 0.5 * coeffs.get(AngularIndex::K2cc)
        }
        ObservableKind::CombinedAsymmetry => 0.75 * coeffs.get(AngularIndex::K2c),
        ObservableKind::AngularCoefficient(index) => coeffs.get(index),
    })
}

/// Denominator density of the observable at one q² point.
///
/// Rate-normalized observables divide by the integrated rate; the branching
/// ratio divides by the plain bin width (a constant density of one).
pub fn denominator_density(kind: ObservableKind, coeffs: &AngularCoefficients) -> f64 {
    match kind {
        ObservableKind::BranchingRatio => 1.0,
        _ => coeffs.rate(),
    }
}

/// Computes the subleading correction set alone (diagnostic surface).
pub fn subleading_at(
    params: &ParameterPoint,
    wc: &CoefficientPoint,
    q2: f64,
    lepton: Lepton,
    cp: CpState,
    region: Region,
) -> Result<bsl_core::TransversityAmplitudeSet, BslError> {
    correction(params, wc, q2, lepton, cp, region)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsl_ff::lattice_load_nominal;
    use bsl_inputs::{sm_coefficients, ParameterStore};

    fn nominal() -> ParameterPoint {
        lattice_load_nominal(ParameterStore::defaults())
            .set_constraint("Lambdab polarisation", 1.0)
            .freeze()
    }

    #[test]
    fn rate_density_is_positive_across_the_window() {
        let params = nominal();
        let wc = sm_coefficients();
        let boundary = RegionBoundary::default();
        for q2 in [0.5, 2.0, 6.0, 12.0, 19.0] {
            let coeffs =
                angular_at(&params, &wc, q2, Lepton::Mu, CpState::Particle, &boundary).unwrap();
            assert!(coeffs.rate() > 0.0, "q2 = {q2}");
        }
    }

    #[test]
    fn longitudinal_fraction_density_stays_physical() {
        let params = nominal();
        let wc = sm_coefficients();
        let boundary = RegionBoundary::default();
        for q2 in [1.0, 4.0, 16.0] {
            let coeffs =
                angular_at(&params, &wc, q2, Lepton::Mu, CpState::Particle, &boundary).unwrap();
            let fl = numerator_density(
                ObservableKind::LongitudinalPolarization,
                &params,
                &coeffs,
            )
            .unwrap()
                / denominator_density(ObservableKind::LongitudinalPolarization, &coeffs);
            assert!((0.0..=1.0).contains(&fl), "q2 = {q2}: {fl}");
        }
    }

    #[test]
    fn lepton_asymmetry_is_negative_at_high_q2_in_the_standard_model() {
        let params = nominal();
        let wc = sm_coefficients();
        let boundary = RegionBoundary::default();
        let coeffs =
            angular_at(&params, &wc, 16.0, Lepton::Mu, CpState::Particle, &boundary).unwrap();
        let afb = numerator_density(ObservableKind::LeptonAsymmetry, &params, &coeffs).unwrap()
            / denominator_density(ObservableKind::LeptonAsymmetry, &coeffs);
        assert!(afb < 0.0, "{afb}");
    }
}
