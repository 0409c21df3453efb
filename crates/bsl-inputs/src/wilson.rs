//! Wilson-coefficient container: the effective ΔB=1 basis at the matching
//! scale, with layered new-physics shifts.

use std::collections::BTreeMap;

use bsl_core::errors::{BslError, ErrorDetail};
use bsl_core::CoefficientPoint;
use num_complex::Complex64;

/// Matching scale at which the stored basis is quoted, GeV.
pub const MU_B: f64 = 4.8;

/// Names of the effective ΔB=1 basis carried by this engine.
pub const BASIS: [&str; 13] = [
    "C1", "C2", "C3", "C4", "C5", "C6", "C7eff", "C8eff", "C9", "C10", "C7p", "C9p", "C10p",
];

// Standard Model values of the effective basis at mu_b = 4.8 GeV (NNLL
// matching and running; chirality-flipped coefficients vanish).
const SM_VALUES: [f64; 13] = [
    -0.294, 1.017, -0.0059, -0.087, 0.0004, 0.0011, -0.2957, -0.1630, 4.114, -4.193, 0.0, 0.0,
    0.0,
];

/// Returns the Standard Model coefficient point at the matching scale.
pub fn sm_coefficients() -> CoefficientPoint {
    let values: BTreeMap<String, Complex64> = BASIS
        .iter()
        .zip(SM_VALUES.iter())
        .map(|(name, value)| (name.to_string(), Complex64::new(*value, 0.0)))
        .collect();
    CoefficientPoint::from_values(MU_B, values)
}

/// Layers a new-physics shift on top of an existing point.
///
/// Only names of the carried basis are accepted; a typo must fail loudly
/// rather than silently create a coefficient nothing reads.
pub fn with_shift(
    point: &CoefficientPoint,
    name: &str,
    shift: Complex64,
) -> Result<CoefficientPoint, BslError> {
    if !BASIS.contains(&name) {
        return Err(BslError::Coefficient(
            ErrorDetail::new("unknown-coefficient", "shift targets an unknown coefficient")
                .with("name", name)
                .hinted("valid names are C1..C6, C7eff, C8eff, C9, C10, C7p, C9p, C10p"),
        ));
    }
    let values: BTreeMap<String, Complex64> = point
        .iter()
        .map(|(key, value)| {
            let shifted = if key == name { value + shift } else { value };
            (key.to_string(), shifted)
        })
        .collect();
    Ok(CoefficientPoint::from_values(point.scale(), values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sm_point_resolves_the_full_basis() {
        let point = sm_coefficients();
        for name in BASIS {
            assert!(point.get(name).is_ok(), "{name}");
        }
        assert!((point.get("C9").unwrap().re - 4.114).abs() < 1e-12);
        assert_eq!(point.get("C10p").unwrap(), Complex64::new(0.0, 0.0));
        assert!(point.get("C11").is_err());
    }

    #[test]
    fn shifts_apply_to_a_single_coefficient() {
        let point = sm_coefficients();
        let shifted = with_shift(&point, "C9", Complex64::new(-1.0, 0.5)).unwrap();
        assert!((shifted.get("C9").unwrap() - Complex64::new(3.114, 0.5)).norm() < 1e-12);
        assert_eq!(shifted.get("C10").unwrap(), point.get("C10").unwrap());
        assert!(with_shift(&point, "C42", Complex64::new(1.0, 0.0)).is_err());
    }
}
