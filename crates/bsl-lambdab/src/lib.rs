#![deny(missing_docs)]
#![doc = "Transversity amplitudes and angular observables for the rare decay Lambdab -> Lambda l+ l-."]

mod amplitudes;
mod angular;
mod observables;
mod subleading;

pub mod loops;

pub use amplitudes::transversity_amplitudes;
pub use angular::{angular_coefficients, AngularCoefficients, AngularIndex, AngularInputs};
pub use observables::{
    angular_at, denominator_density, numerator_density, subleading_at, ObservableKind,
};
pub use subleading::{correction, Region, RegionBoundary};

use bsl_core::errors::BslError;
use bsl_core::{CoefficientPoint, CpState, ParameterPoint, TransversityAmplitudeSet};
use serde::{Deserialize, Serialize};

/// Charged-lepton flavor of the final state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lepton {
    /// Electron pair.
    E,
    /// Muon pair.
    Mu,
}

impl Lepton {
    /// Name of the mass parameter of the flavor.
    pub fn mass_parameter(self) -> &'static str {
        match self {
            Lepton::E => "m_e",
            Lepton::Mu => "m_mu",
        }
    }

    /// Pair label used in observable names.
    pub fn pair_label(self) -> &'static str {
        match self {
            Lepton::E => "ee",
            Lepton::Mu => "mumu",
        }
    }
}

/// Leading amplitudes plus the subleading correction of the regime the q²
/// point falls into.
pub fn transversity_with_corrections(
    params: &ParameterPoint,
    wc: &CoefficientPoint,
    q2: f64,
    lepton: Lepton,
    cp: CpState,
    boundary: &RegionBoundary,
) -> Result<TransversityAmplitudeSet, BslError> {
    let leading = transversity_amplitudes(params, wc, q2, lepton, cp)?;
    let region = boundary.region_for(q2);
    let shift = correction(params, wc, q2, lepton, cp, region)?;
    Ok(leading.added(&shift))
}
