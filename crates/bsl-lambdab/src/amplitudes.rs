//! Construction of the eight transversity amplitudes at one q² point.

use bsl_core::errors::{BslError, ErrorDetail};
use bsl_core::{
    AmplitudeKey, Chirality, CoefficientPoint, CpState, ParameterPoint, PhysicalWindow,
    Transversity, TransversityAmplitudeSet,
};
use bsl_ff::FormFactorSet;
use bsl_inputs::{running, xi, DownTransition, UpQuark};
use num_complex::Complex64;
use std::f64::consts::PI;

use crate::loops;
use crate::Lepton;

/// Kinematic structure of one transversity slot.
///
/// Every amplitude is `base · (vector_weight · C_lepton + photon_weight · C7
/// combo)`, so the subleading-correction provider can reuse the same
/// geometry with shifted couplings.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SlotGeometry {
    pub base: Complex64,
    pub vector_weight: f64,
    pub photon_weight: f64,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ChannelKinematics {
    pub s_plus: f64,
    pub s_minus: f64,
    pub beta_l: f64,
    pub m_lambdab: f64,
    pub m_lambda: f64,
    pub m_b: f64,
}

impl ChannelKinematics {
    pub(crate) fn at(
        params: &ParameterPoint,
        q2: f64,
        lepton: Lepton,
        scale: f64,
    ) -> Result<Self, BslError> {
        let m_lambdab = params.get("m_Lambdab")?;
        let m_lambda = params.get("m_Lambda")?;
        let m_lepton = params.get(lepton.mass_parameter())?;
        let window = PhysicalWindow::for_masses(m_lepton, m_lambdab, m_lambda);
        window.check(q2)?;
        let s_plus = (m_lambdab + m_lambda) * (m_lambdab + m_lambda) - q2;
        let s_minus = (m_lambdab - m_lambda) * (m_lambdab - m_lambda) - q2;
        let beta_l = (1.0 - 4.0 * m_lepton * m_lepton / q2).sqrt();
        Ok(Self {
            s_plus,
            s_minus,
            beta_l,
            m_lambdab,
            m_lambda,
            m_b: running::m_b_msbar(params, scale)?,
        })
    }
}

/// Overall normalization N(q²), carrying the CKM factor and phase space.
pub(crate) fn normalization_for(
    params: &ParameterPoint,
    kin: &ChannelKinematics,
    q2: f64,
    xi_t: Complex64,
) -> Result<Complex64, BslError> {
    let gf = params.get("GF")?;
    let alpha_e = running::alpha_e(params)?;
    let lambda = kin.s_plus * kin.s_minus;
    let cube = kin.m_lambdab.powi(3);
    let phase_space =
        (q2 * kin.beta_l * lambda.sqrt() / (3.0 * 2048.0 * cube * PI.powi(5))).sqrt();
    Ok(xi_t * gf * alpha_e * phase_space)
}

/// Per-slot bases and form-factor weights at one q² point.
pub(crate) fn slot_geometry(
    kin: &ChannelKinematics,
    norm: Complex64,
    ff: &FormFactorSet,
    q2: f64,
) -> [(Transversity, SlotGeometry); 4] {
    let m_sum = kin.m_lambdab + kin.m_lambda;
    let m_diff = kin.m_lambdab - kin.m_lambda;
    let root2 = std::f64::consts::SQRT_2;
    [
        (
            Transversity::Perp1,
            SlotGeometry {
                base: -2.0 * norm * (2.0 * kin.s_minus).sqrt(),
                vector_weight: ff.f_perp,
                photon_weight: 2.0 * kin.m_b * m_sum / q2 * ff.h_perp,
            },
        ),
        (
            Transversity::Para1,
            SlotGeometry {
                base: 2.0 * norm * (2.0 * kin.s_plus).sqrt(),
                vector_weight: ff.g_perp,
                photon_weight: 2.0 * kin.m_b * m_diff / q2 * ff.ht_perp,
            },
        ),
        (
            Transversity::Perp0,
            SlotGeometry {
                base: root2 * norm * (kin.s_minus / q2).sqrt(),
                vector_weight: ff.f_plus * m_sum,
                photon_weight: 2.0 * kin.m_b * ff.h_plus,
            },
        ),
        (
            Transversity::Para0,
            SlotGeometry {
                base: -root2 * norm * (kin.s_plus / q2).sqrt(),
                vector_weight: ff.g_plus * m_diff,
                photon_weight: 2.0 * kin.m_b * ff.ht_plus,
            },
        ),
    ]
}

fn is_perp(slot: Transversity) -> bool {
    matches!(slot, Transversity::Perp0 | Transversity::Perp1)
}

/// Computes the eight transversity amplitudes.
///
/// For [`CpState::Antiparticle`] both the CKM factor and the weak phases of
/// the Wilson coefficients are conjugated before the loop functions are
/// attached, so absorptive (strong) phases survive conjugation.
pub fn transversity_amplitudes(
    params: &ParameterPoint,
    wc: &CoefficientPoint,
    q2: f64,
    lepton: Lepton,
    cp: CpState,
) -> Result<TransversityAmplitudeSet, BslError> {
    let kin = ChannelKinematics::at(params, q2, lepton, wc.scale())?;
    let mut xi_t = xi(params, UpQuark::Top, DownTransition::Bs)?;
    let wc_eff;
    let wc = if cp.is_conjugate() {
        xi_t = xi_t.conj();
        wc_eff = wc.conjugated();
        &wc_eff
    } else {
        wc
    };

    let c9eff = wc.get("C9")? + loops::y(params, wc, q2)?;
    let c9p = wc.get("C9p")?;
    let c10 = wc.get("C10")?;
    let c10p = wc.get("C10p")?;
    let c7eff = wc.get("C7eff")?;
    let c7p = wc.get("C7p")?;

    let ff = bsl_ff::evaluate(params, q2)?;
    let norm = normalization_for(params, &kin, q2, xi_t)?;

    let mut amps = TransversityAmplitudeSet::zero();
    for (slot, geometry) in slot_geometry(&kin, norm, &ff, q2) {
        // Perp slots couple to the parity-even coefficient combinations,
        // para slots to the parity-odd ones.
        let sign = if is_perp(slot) { 1.0 } else { -1.0 };
        let cv = c9eff + sign * c9p;
        let ca = c10 + sign * c10p;
        let c7 = c7eff + sign * c7p;
        for chirality in [Chirality::L, Chirality::R] {
            let lepton_combo = match chirality {
                Chirality::L => cv - ca,
                Chirality::R => cv + ca,
            };
            let value = geometry.base
                * (geometry.vector_weight * lepton_combo + geometry.photon_weight * c7);
            amps.set(AmplitudeKey::new(slot, chirality), value);
        }
    }
    if !amps.is_finite() {
        return Err(BslError::Numerics(
            ErrorDetail::new("non-finite-amplitude", "amplitude evaluated non-finite")
                .with("q2", q2),
        ));
    }
    Ok(amps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsl_ff::lattice_load_nominal;
    use bsl_inputs::{sm_coefficients, ParameterStore};

    fn nominal() -> ParameterPoint {
        lattice_load_nominal(ParameterStore::defaults()).freeze()
    }

    #[test]
    fn left_handed_amplitudes_dominate_in_the_standard_model() {
        let params = nominal();
        let wc = sm_coefficients();
        let amps = transversity_amplitudes(&params, &wc, 6.0, Lepton::Mu, CpState::Particle)
            .unwrap();
        for slot in [
            Transversity::Para0,
            Transversity::Para1,
            Transversity::Perp0,
            Transversity::Perp1,
        ] {
            let left = amps.get(AmplitudeKey::new(slot, Chirality::L)).norm();
            let right = amps.get(AmplitudeKey::new(slot, Chirality::R)).norm();
            assert!(left > 2.0 * right, "{slot:?}: L={left}, R={right}");
        }
    }

    #[test]
    fn out_of_window_q2_is_a_domain_error() {
        let params = nominal();
        let wc = sm_coefficients();
        let err = transversity_amplitudes(&params, &wc, 0.02, Lepton::Mu, CpState::Particle)
            .unwrap_err();
        assert_eq!(err.detail().code, "q2-outside-window");
    }

    #[test]
    fn conjugation_flips_the_weak_phase_only() {
        let params = nominal();
        let wc = sm_coefficients();
        let q2 = 15.0;
        let plain = transversity_amplitudes(&params, &wc, q2, Lepton::Mu, CpState::Particle)
            .unwrap();
        let conj = transversity_amplitudes(&params, &wc, q2, Lepton::Mu, CpState::Antiparticle)
            .unwrap();
        // Standard Model coefficients are real: conjugation flips only the
        // global CKM phase, so every modulus is unchanged.
        for (key, value) in plain.iter() {
            let ratio = conj.get(key).norm() / value.norm();
            assert!((ratio - 1.0).abs() < 1e-12, "{key:?}: {ratio}");
        }
    }
}
