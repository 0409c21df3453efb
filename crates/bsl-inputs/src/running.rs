//! Leading-order running of the strong coupling and the b-quark mass.

use bsl_core::errors::{BslError, ErrorDetail};
use bsl_core::ParameterPoint;

// Leading-order QCD coefficients for five active flavors.
const BETA0: f64 = 23.0 / 3.0;
const GAMMA_M0: f64 = 8.0;

/// Leading-order strong coupling at the given scale, run from α_s(mZ).
pub fn alpha_s(params: &ParameterPoint, scale: f64) -> Result<f64, BslError> {
    if !(scale.is_finite() && scale > 1.0) {
        return Err(BslError::Numerics(
            ErrorDetail::new("invalid-scale", "running requires a perturbative scale")
                .with("scale", scale),
        ));
    }
    let alpha_mz = params.get("alpha_s")?;
    let m_z = params.get("m_Z")?;
    let denom = 1.0 + alpha_mz * BETA0 / (2.0 * std::f64::consts::PI) * (scale / m_z).ln();
    Ok(alpha_mz / denom)
}

/// MS-bar b-quark mass at the given scale, evolved at leading order from
/// m_b(m_b).
pub fn m_b_msbar(params: &ParameterPoint, scale: f64) -> Result<f64, BslError> {
    let mb_mb = params.get("m_b")?;
    let ratio = alpha_s(params, scale)? / alpha_s(params, mb_mb)?;
    Ok(mb_mb * ratio.powf(GAMMA_M0 / (2.0 * BETA0)))
}

/// Electromagnetic coupling entering the amplitude normalization.
///
/// The stored value is quoted at the matching scale; no leptonic running is
/// performed here.
pub fn alpha_e(params: &ParameterPoint) -> Result<f64, BslError> {
    params.get("alpha_e")
}
