use bsl_core::{AmplitudeKey, TransversityAmplitudeSet};
use bsl_lambdab::{angular_coefficients, AngularIndex, AngularInputs};
use num_complex::Complex64;
use proptest::prelude::*;

fn amplitude_set() -> impl Strategy<Value = TransversityAmplitudeSet> {
    proptest::collection::vec((-1.0f64..1.0, -1.0f64..1.0), 8).prop_map(|parts| {
        let mut amps = TransversityAmplitudeSet::zero();
        for (key, (re, im)) in AmplitudeKey::ALL.iter().zip(parts) {
            amps.set(*key, Complex64::new(re, im));
        }
        amps
    })
}

fn inputs() -> impl Strategy<Value = AngularInputs> {
    (0.0f64..=1.0, -1.0f64..=1.0, 0.1f64..=1.0).prop_map(|(alpha, polarization, beta_l)| {
        AngularInputs {
            alpha,
            polarization,
            beta_l,
        }
    })
}

proptest! {
    #[test]
    fn rate_is_the_incoherent_sum_of_moduli(amps in amplitude_set(), inp in inputs()) {
        let coeffs = angular_coefficients(&amps, &inp);
        let total: f64 = amps.iter().map(|(_, a)| a.norm_sqr()).sum();
        prop_assert!((coeffs.rate() - total).abs() < 1e-12);
    }

    #[test]
    fn polarized_coefficients_are_linear_in_the_polarization(
        amps in amplitude_set(),
        inp in inputs(),
    ) {
        let full = angular_coefficients(&amps, &inp);
        let half = angular_coefficients(
            &amps,
            &AngularInputs { polarization: 0.5 * inp.polarization, ..inp },
        );
        for index in &AngularIndex::ALL[10..] {
            prop_assert!(
                (half.get(*index) - 0.5 * full.get(*index)).abs() < 1e-12,
                "{}", index.label()
            );
        }
    }

    #[test]
    fn unpolarized_coefficients_ignore_the_polarization(
        amps in amplitude_set(),
        inp in inputs(),
    ) {
        let with = angular_coefficients(&amps, &inp);
        let without = angular_coefficients(
            &amps,
            &AngularInputs { polarization: 0.0, ..inp },
        );
        for index in &AngularIndex::ALL[..10] {
            prop_assert_eq!(with.get(*index), without.get(*index), "{}", index.label());
        }
    }

    #[test]
    fn coefficients_are_blind_to_a_global_phase(
        amps in amplitude_set(),
        inp in inputs(),
        phase in 0.0f64..std::f64::consts::TAU,
    ) {
        let rotation = Complex64::from_polar(1.0, phase);
        let mut rotated = TransversityAmplitudeSet::zero();
        for (key, value) in amps.iter() {
            rotated.set(key, rotation * value);
        }
        let original = angular_coefficients(&amps, &inp);
        let spun = angular_coefficients(&rotated, &inp);
        for (index, value) in original.iter() {
            prop_assert!((value - spun.get(index)).abs() < 1e-12, "{}", index.label());
        }
    }

    #[test]
    fn daughter_asymmetry_bounds_the_interference(amps in amplitude_set(), inp in inputs()) {
        let coeffs = angular_coefficients(&amps, &inp);
        // Cauchy-Schwarz on the transverse interference term.
        prop_assert!(
            coeffs.get(AngularIndex::K2cc).abs()
                <= inp.alpha * coeffs.get(AngularIndex::K1cc) + 1e-12
        );
    }
}
