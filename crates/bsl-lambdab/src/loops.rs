//! One-loop quark matrix elements entering the effective C9.

use bsl_core::errors::BslError;
use bsl_core::{CoefficientPoint, ParameterPoint};
use bsl_inputs::running;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Basic fermion-loop function of the vector current.
///
/// Below the q² = 4 m_q² threshold the function is real; above it the
/// absorptive part is positive. The massless branch carries the light-quark
/// contribution.
pub fn h(q2: f64, mq: f64, mu: f64) -> Complex64 {
    if mq == 0.0 {
        return Complex64::new(8.0 / 27.0 - 4.0 / 9.0 * (q2 / (mu * mu)).ln(), 4.0 * PI / 9.0);
    }
    let z = 4.0 * mq * mq / q2;
    let real = -4.0 / 9.0 * (mq * mq / (mu * mu)).ln() + 8.0 / 27.0 + 4.0 / 9.0 * z;
    let root = (z - 1.0).abs().sqrt();
    let branch = if z > 1.0 {
        Complex64::new((1.0 / root).atan(), 0.0)
    } else {
        Complex64::new(((1.0 + (1.0 - z).sqrt()) / z.sqrt()).ln(), -PI / 2.0)
    };
    Complex64::new(real, 0.0) - 4.0 / 9.0 * (2.0 + z) * root * branch
}

/// Matrix-element contribution Y(q²) added to C9.
///
/// Built from the four-quark coefficients C1 … C6 with the charm, bottom and
/// light-quark loops. CP conjugation of the coefficient point leaves the
/// absorptive parts of the loops untouched, as it must.
pub fn y(params: &ParameterPoint, wc: &CoefficientPoint, q2: f64) -> Result<Complex64, BslError> {
    let mu = wc.scale();
    let mc = params.get("m_c")?;
    let mb = running::m_b_msbar(params, mu)?;
    let c1 = wc.get("C1")?;
    let c2 = wc.get("C2")?;
    let c3 = wc.get("C3")?;
    let c4 = wc.get("C4")?;
    let c5 = wc.get("C5")?;
    let c6 = wc.get("C6")?;
    let charm = h(q2, mc, mu) * (4.0 / 3.0 * c1 + c2 + 6.0 * c3 + 60.0 * c5);
    let bottom = h(q2, mb, mu) * (7.0 * c3 + 4.0 / 3.0 * c4 + 76.0 * c5 + 64.0 / 3.0 * c6) * 0.5;
    let light = h(q2, 0.0, mu) * (c3 + 4.0 / 3.0 * c4 + 16.0 * c5 + 64.0 / 3.0 * c6) * 0.5;
    let contact = 4.0 / 3.0 * c3 + 64.0 / 9.0 * c5 + 64.0 / 27.0 * c6;
    Ok(charm - bottom - light + contact)
}
