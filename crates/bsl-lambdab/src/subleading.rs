//! Additive hadronic power corrections to the transversity amplitudes.
//!
//! Two independently parameterized models: a soft-collinear expansion below
//! the charmonium region (`deltaC7`-like shifts) and an OPE expansion above
//! it (`deltaC9`-like shifts). Central values of all shift parameters are
//! zero; the provider still returns every amplitude slot.

use bsl_core::errors::BslError;
use bsl_core::{
    AmplitudeKey, Chirality, CoefficientPoint, CpState, ParameterPoint, Transversity,
    TransversityAmplitudeSet,
};
use bsl_inputs::{xi, DownTransition, UpQuark};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::amplitudes::{slot_geometry, ChannelKinematics};
use crate::Lepton;

/// Kinematic regime a correction model is constructed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// Below the charmonium resonances.
    Low,
    /// Above the charmonium resonances.
    High,
}

fn default_boundary() -> f64 {
    9.0
}

/// Boundary between the two correction regimes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionBoundary {
    /// q² value separating the low and high regimes, GeV².
    #[serde(default = "default_boundary")]
    pub q2_split: f64,
}

impl Default for RegionBoundary {
    fn default() -> Self {
        Self {
            q2_split: default_boundary(),
        }
    }
}

impl RegionBoundary {
    /// Selects the regime for a q² point.
    pub fn region_for(&self, q2: f64) -> Region {
        if q2 < self.q2_split {
            Region::Low
        } else {
            Region::High
        }
    }
}

fn shift_parameter(
    params: &ParameterPoint,
    region: Region,
    slot: Transversity,
    cp: CpState,
) -> Result<Complex64, BslError> {
    let (tag, prefix) = match region {
        Region::Low => ("deltaC7", "a"),
        Region::High => ("deltaC9", "b"),
    };
    let re = params.get(&format!("Lambdab->Lambda {tag} {prefix}_{} Re", slot.label()))?;
    let im = params.get(&format!("Lambdab->Lambda {tag} {prefix}_{} Im", slot.label()))?;
    let shift = Complex64::new(re, im);
    Ok(match cp {
        CpState::Particle => shift,
        CpState::Antiparticle => shift.conj(),
    })
}

/// Computes the additive correction amplitudes for one regime.
///
/// The shifts ride the same kinematic geometry as the leading amplitudes: a
/// `deltaC7` shift enters through the photon-pole weight of its slot, a
/// `deltaC9` shift through the vector-current weight, identically for both
/// lepton chiralities. All eight keys are always populated.
pub fn correction(
    params: &ParameterPoint,
    wc: &CoefficientPoint,
    q2: f64,
    lepton: Lepton,
    cp: CpState,
    region: Region,
) -> Result<TransversityAmplitudeSet, BslError> {
    let kin = ChannelKinematics::at(params, q2, lepton, wc.scale())?;
    let mut xi_t = xi(params, UpQuark::Top, DownTransition::Bs)?;
    if cp.is_conjugate() {
        xi_t = xi_t.conj();
    }
    let ff = bsl_ff::evaluate(params, q2)?;
    let norm = crate::amplitudes::normalization_for(params, &kin, q2, xi_t)?;

    let mut amps = TransversityAmplitudeSet::zero();
    for (slot, geometry) in slot_geometry(&kin, norm, &ff, q2) {
        let shift = shift_parameter(params, region, slot, cp)?;
        let weight = match region {
            Region::Low => geometry.photon_weight,
            Region::High => geometry.vector_weight,
        };
        let value = geometry.base * weight * shift;
        for chirality in [Chirality::L, Chirality::R] {
            amps.set(AmplitudeKey::new(slot, chirality), value);
        }
    }
    Ok(amps)
}
