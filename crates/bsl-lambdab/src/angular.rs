//! Assembly of the angular coefficient functions from the transversity
//! amplitudes, pointwise in q².
//!
//! Every coefficient is a Hermitian bilinear in the eight amplitudes, so the
//! outputs are exactly real. The unpolarized set K1ss … K4s matches the
//! four-fold angular distribution of the unpolarized decay; K11 … K34 carry
//! the production polarization and vanish at P = 0. Imaginary-part
//! combinations vanish when all amplitudes share a common phase.

use bsl_core::{AmplitudeKey, Chirality, Transversity, TransversityAmplitudeSet};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

const SQRT2_INV: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Index of one angular coefficient function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum AngularIndex {
    K1ss,
    K1cc,
    K1c,
    K2ss,
    K2cc,
    K2c,
    K3sc,
    K3s,
    K4sc,
    K4s,
    K11,
    K12,
    K13,
    K14,
    K15,
    K16,
    K17,
    K18,
    K19,
    K20,
    K21,
    K22,
    K23,
    K24,
    K25,
    K26,
    K27,
    K28,
    K29,
    K30,
    K31,
    K32,
    K33,
    K34,
}

impl AngularIndex {
    /// All thirty-four coefficients in canonical order.
    pub const ALL: [AngularIndex; 34] = [
        AngularIndex::K1ss,
        AngularIndex::K1cc,
        AngularIndex::K1c,
        AngularIndex::K2ss,
        AngularIndex::K2cc,
        AngularIndex::K2c,
        AngularIndex::K3sc,
        AngularIndex::K3s,
        AngularIndex::K4sc,
        AngularIndex::K4s,
        AngularIndex::K11,
        AngularIndex::K12,
        AngularIndex::K13,
        AngularIndex::K14,
        AngularIndex::K15,
        AngularIndex::K16,
        AngularIndex::K17,
        AngularIndex::K18,
        AngularIndex::K19,
        AngularIndex::K20,
        AngularIndex::K21,
        AngularIndex::K22,
        AngularIndex::K23,
        AngularIndex::K24,
        AngularIndex::K25,
        AngularIndex::K26,
        AngularIndex::K27,
        AngularIndex::K28,
        AngularIndex::K29,
        AngularIndex::K30,
        AngularIndex::K31,
        AngularIndex::K32,
        AngularIndex::K33,
        AngularIndex::K34,
    ];

    /// Canonical label used in observable names.
    pub fn label(self) -> &'static str {
        match self {
            AngularIndex::K1ss => "K1ss",
            AngularIndex::K1cc => "K1cc",
            AngularIndex::K1c => "K1c",
            AngularIndex::K2ss => "K2ss",
            AngularIndex::K2cc => "K2cc",
            AngularIndex::K2c => "K2c",
            AngularIndex::K3sc => "K3sc",
            AngularIndex::K3s => "K3s",
            AngularIndex::K4sc => "K4sc",
            AngularIndex::K4s => "K4s",
            AngularIndex::K11 => "K11",
            AngularIndex::K12 => "K12",
            AngularIndex::K13 => "K13",
            AngularIndex::K14 => "K14",
            AngularIndex::K15 => "K15",
            AngularIndex::K16 => "K16",
            AngularIndex::K17 => "K17",
            AngularIndex::K18 => "K18",
            AngularIndex::K19 => "K19",
            AngularIndex::K20 => "K20",
            AngularIndex::K21 => "K21",
            AngularIndex::K22 => "K22",
            AngularIndex::K23 => "K23",
            AngularIndex::K24 => "K24",
            AngularIndex::K25 => "K25",
            AngularIndex::K26 => "K26",
            AngularIndex::K27 => "K27",
            AngularIndex::K28 => "K28",
            AngularIndex::K29 => "K29",
            AngularIndex::K30 => "K30",
            AngularIndex::K31 => "K31",
            AngularIndex::K32 => "K32",
            AngularIndex::K33 => "K33",
            AngularIndex::K34 => "K34",
        }
    }

    fn slot(self) -> usize {
        AngularIndex::ALL
            .iter()
            .position(|idx| *idx == self)
            .unwrap_or(0)
    }
}

/// The angular coefficient functions evaluated at one q² point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularCoefficients {
    values: [f64; 34],
}

impl AngularCoefficients {
    /// Returns the coefficient stored under the given index.
    pub fn get(&self, index: AngularIndex) -> f64 {
        self.values[index.slot()]
    }

    /// Differential decay rate, dΓ/dq² = 2·K1ss + K1cc.
    pub fn rate(&self) -> f64 {
        2.0 * self.get(AngularIndex::K1ss) + self.get(AngularIndex::K1cc)
    }

    /// Iterates over all coefficients in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (AngularIndex, f64)> + '_ {
        AngularIndex::ALL
            .iter()
            .map(move |&index| (index, self.get(index)))
    }
}

// Bilinear building blocks of one lepton chirality.
struct Bilinears {
    n1: f64,
    n0: f64,
    d1: f64,
    d0: f64,
    v: Complex64,
    w: Complex64,
    u_para: Complex64,
    u_perp: Complex64,
    x: Complex64,
    y: Complex64,
}

fn bilinears(amps: &TransversityAmplitudeSet, chirality: Chirality) -> Bilinears {
    let para0 = amps.get(AmplitudeKey::new(Transversity::Para0, chirality));
    let para1 = amps.get(AmplitudeKey::new(Transversity::Para1, chirality));
    let perp0 = amps.get(AmplitudeKey::new(Transversity::Perp0, chirality));
    let perp1 = amps.get(AmplitudeKey::new(Transversity::Perp1, chirality));
    Bilinears {
        n1: para1.norm_sqr() + perp1.norm_sqr(),
        n0: para0.norm_sqr() + perp0.norm_sqr(),
        d1: para1.norm_sqr() - perp1.norm_sqr(),
        d0: para0.norm_sqr() - perp0.norm_sqr(),
        v: para1 * perp1.conj(),
        w: para0 * perp0.conj(),
        u_para: para0 * para1.conj(),
        u_perp: perp0 * perp1.conj(),
        x: para0 * perp1.conj(),
        y: perp0 * para1.conj(),
    }
}

/// Inputs of the assembly besides the amplitudes themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngularInputs {
    /// Parity-violating decay asymmetry of the daughter baryon.
    pub alpha: f64,
    /// Production polarization of the parent baryon.
    pub polarization: f64,
    /// Lepton velocity βℓ = √(1 − 4 mℓ²/q²).
    pub beta_l: f64,
}

/// Combines the eight amplitudes into the angular coefficient functions.
pub fn angular_coefficients(
    amps: &TransversityAmplitudeSet,
    inputs: &AngularInputs,
) -> AngularCoefficients {
    let l = bilinears(amps, Chirality::L);
    let r = bilinears(amps, Chirality::R);
    let alpha = inputs.alpha;
    let p = inputs.polarization;
    let beta = inputs.beta_l;

    let sum_n1 = l.n1 + r.n1;
    let sum_n0 = l.n0 + r.n0;
    let diff_n1 = l.n1 - r.n1;
    let diff_n0 = l.n0 - r.n0;
    let sum_d1 = l.d1 + r.d1;
    let sum_d0 = l.d0 + r.d0;
    let diff_d1 = l.d1 - r.d1;
    let diff_d0 = l.d0 - r.d0;
    let sum_v = l.v + r.v;
    let diff_v = l.v - r.v;
    let sum_w = l.w + r.w;
    let diff_w = l.w - r.w;
    let sum_upara = l.u_para + r.u_para;
    let diff_upara = l.u_para - r.u_para;
    let sum_uperp = l.u_perp + r.u_perp;
    let diff_uperp = l.u_perp - r.u_perp;
    let sum_x = l.x + r.x;
    let diff_x = l.x - r.x;
    let sum_y = l.y + r.y;
    let diff_y = l.y - r.y;

    let values = [
        // K1ss, K1cc, K1c
        0.25 * (sum_n1 + 2.0 * sum_n0),
        0.5 * sum_n1,
        beta * diff_v.re,
        // K2ss, K2cc, K2c
        0.5 * alpha * (sum_v.re + 2.0 * sum_w.re),
        alpha * sum_v.re,
        0.5 * alpha * beta * diff_n1,
        // K3sc, K3s
        alpha * SQRT2_INV * (sum_upara.im - sum_uperp.im),
        alpha * beta * SQRT2_INV * (diff_x.im - diff_y.im),
        // K4sc, K4s
        alpha * SQRT2_INV * (sum_upara.re - sum_uperp.re),
        alpha * beta * SQRT2_INV * (diff_x.re + diff_y.re),
        // K11 .. K14
        -p * SQRT2_INV * (sum_upara.re + sum_uperp.re),
        p * beta * SQRT2_INV * (diff_x.re + diff_y.re),
        p * beta * SQRT2_INV * (diff_upara.re + diff_uperp.re),
        -p * SQRT2_INV * (sum_x.re + sum_y.re),
        // K15 .. K18
        -alpha * p * SQRT2_INV * (sum_upara.re - sum_uperp.re),
        alpha * p * SQRT2_INV * (sum_x.re - sum_y.re),
        alpha * p * beta * SQRT2_INV * (diff_upara.re - diff_uperp.re),
        -alpha * p * beta * SQRT2_INV * (diff_x.re - diff_y.re),
        // K19 .. K22
        -p * SQRT2_INV * (sum_x.im + sum_y.im),
        p * beta * SQRT2_INV * (diff_upara.im + diff_uperp.im),
        alpha * p * SQRT2_INV * (sum_x.im - sum_y.im),
        -alpha * p * beta * SQRT2_INV * (diff_upara.im - diff_uperp.im),
        // K23 .. K26
        -0.5 * alpha * p * (sum_v.re + 2.0 * sum_w.re),
        0.25 * alpha * p * (sum_d1 + 2.0 * sum_d0),
        -0.5 * alpha * p * sum_v.im,
        0.5 * alpha * p * sum_w.im,
        // K27 .. K30
        -0.5 * alpha * p * beta * (diff_v.re + 2.0 * diff_w.re),
        0.25 * alpha * p * beta * (diff_d1 + 2.0 * diff_d0),
        0.5 * alpha * p * beta * diff_w.im,
        -0.5 * alpha * p * beta * diff_v.im,
        // K31 .. K34
        -p * SQRT2_INV * (sum_upara.im - sum_uperp.im),
        0.25 * alpha * p * beta * diff_v.re,
        -0.125 * alpha * p * beta * (diff_n1 - 2.0 * diff_n0),
        -p * beta * SQRT2_INV * (diff_x.im - diff_y.im),
    ];
    AngularCoefficients { values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsl_core::AmplitudeKey;

    fn synthetic_amps(seedlike: u64) -> TransversityAmplitudeSet {
        // Deterministic, structureless fill.
        let mut amps = TransversityAmplitudeSet::zero();
        let mut state = seedlike;
        for key in AmplitudeKey::ALL {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let re = ((state >> 33) as f64) / (u32::MAX as f64) - 0.5;
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let im = ((state >> 33) as f64) / (u32::MAX as f64) - 0.5;
            amps.set(key, Complex64::new(re, im));
        }
        amps
    }

    fn inputs() -> AngularInputs {
        AngularInputs {
            alpha: 0.642,
            polarization: 1.0,
            beta_l: 1.0,
        }
    }

    #[test]
    fn rate_equals_incoherent_sum_of_moduli() {
        let amps = synthetic_amps(7);
        let coeffs = angular_coefficients(&amps, &inputs());
        let total: f64 = amps.iter().map(|(_, a)| a.norm_sqr()).sum();
        assert!((coeffs.rate() - total).abs() < 1e-12);
    }

    #[test]
    fn polarized_set_vanishes_without_polarization() {
        let amps = synthetic_amps(11);
        let coeffs = angular_coefficients(
            &amps,
            &AngularInputs {
                polarization: 0.0,
                ..inputs()
            },
        );
        for index in &AngularIndex::ALL[10..] {
            assert_eq!(coeffs.get(*index), 0.0, "{}", index.label());
        }
    }

    #[test]
    fn imaginary_part_combinations_vanish_for_relatively_real_amplitudes() {
        let mut amps = TransversityAmplitudeSet::zero();
        let phase = Complex64::from_polar(1.0, 0.73);
        for (idx, key) in AmplitudeKey::ALL.iter().enumerate() {
            // Common phase, real relative coefficients.
            amps.set(*key, phase * (0.2 + idx as f64 * 0.1));
        }
        let coeffs = angular_coefficients(&amps, &inputs());
        for index in [
            AngularIndex::K3sc,
            AngularIndex::K3s,
            AngularIndex::K19,
            AngularIndex::K20,
            AngularIndex::K21,
            AngularIndex::K22,
            AngularIndex::K25,
            AngularIndex::K26,
            AngularIndex::K29,
            AngularIndex::K30,
            AngularIndex::K31,
            AngularIndex::K34,
        ] {
            assert!(coeffs.get(index).abs() < 1e-14, "{}", index.label());
        }
    }

    #[test]
    fn interference_respects_cauchy_schwarz() {
        for seed in 1..32u64 {
            let amps = synthetic_amps(seed);
            let coeffs = angular_coefficients(&amps, &inputs());
            let bound = inputs().alpha * coeffs.get(AngularIndex::K1cc);
            assert!(coeffs.get(AngularIndex::K2cc).abs() <= bound + 1e-12, "seed {seed}");
        }
    }
}
