use bsl_core::errors::{BslError, ErrorDetail};
use bsl_core::ParameterPoint;
use bsl_inputs::ParameterStore;
use serde::{Deserialize, Serialize};

// Pole masses of the Bs spectrum by quantum numbers of the current, GeV.
const POLE_1_MINUS: f64 = 5.4154;
const POLE_0_PLUS: f64 = 5.711;
const POLE_1_PLUS: f64 = 5.750;
const POLE_0_MINUS: f64 = 5.3669;

/// One of the ten helicity form factors of the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFactor {
    /// Timelike vector.
    F0,
    /// Longitudinal vector.
    FPlus,
    /// Transverse vector.
    FPerp,
    /// Timelike axial.
    G0,
    /// Longitudinal axial.
    GPlus,
    /// Transverse axial.
    GPerp,
    /// Longitudinal tensor.
    HPlus,
    /// Transverse tensor.
    HPerp,
    /// Longitudinal pseudo-tensor.
    HTildePlus,
    /// Transverse pseudo-tensor.
    HTildePerp,
}

impl FormFactor {
    /// All ten form factors in canonical order.
    pub const ALL: [FormFactor; 10] = [
        FormFactor::F0,
        FormFactor::FPlus,
        FormFactor::FPerp,
        FormFactor::G0,
        FormFactor::GPlus,
        FormFactor::GPerp,
        FormFactor::HPlus,
        FormFactor::HPerp,
        FormFactor::HTildePlus,
        FormFactor::HTildePerp,
    ];

    /// Label used inside parameter names.
    pub fn label(self) -> &'static str {
        match self {
            FormFactor::F0 => "f0",
            FormFactor::FPlus => "fplus",
            FormFactor::FPerp => "fperp",
            FormFactor::G0 => "g0",
            FormFactor::GPlus => "gplus",
            FormFactor::GPerp => "gperp",
            FormFactor::HPlus => "hplus",
            FormFactor::HPerp => "hperp",
            FormFactor::HTildePlus => "htildeplus",
            FormFactor::HTildePerp => "htildeperp",
        }
    }

    /// Pole mass governing the single-pole prefactor, by the J^P of the
    /// current the form factor couples to.
    pub fn pole_mass(self) -> f64 {
        match self {
            FormFactor::FPlus | FormFactor::FPerp | FormFactor::HPlus | FormFactor::HPerp => {
                POLE_1_MINUS
            }
            FormFactor::F0 => POLE_0_PLUS,
            FormFactor::GPlus
            | FormFactor::GPerp
            | FormFactor::HTildePlus
            | FormFactor::HTildePerp => POLE_1_PLUS,
            FormFactor::G0 => POLE_0_MINUS,
        }
    }

    fn coefficient_name(self, order: usize) -> String {
        format!("Lambdab->Lambda {} a{order}", self.label())
    }
}

/// Values of all ten form factors at one q² point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct FormFactorSet {
    /// Timelike vector.
    pub f0: f64,
    /// Longitudinal vector.
    pub f_plus: f64,
    /// Transverse vector.
    pub f_perp: f64,
    /// Timelike axial.
    pub g0: f64,
    /// Longitudinal axial.
    pub g_plus: f64,
    /// Transverse axial.
    pub g_perp: f64,
    /// Longitudinal tensor.
    pub h_plus: f64,
    /// Transverse tensor.
    pub h_perp: f64,
    /// Longitudinal pseudo-tensor.
    pub ht_plus: f64,
    /// Transverse pseudo-tensor.
    pub ht_perp: f64,
}

impl FormFactorSet {
    fn set(&mut self, ff: FormFactor, value: f64) {
        match ff {
            FormFactor::F0 => self.f0 = value,
            FormFactor::FPlus => self.f_plus = value,
            FormFactor::FPerp => self.f_perp = value,
            FormFactor::G0 => self.g0 = value,
            FormFactor::GPlus => self.g_plus = value,
            FormFactor::GPerp => self.g_perp = value,
            FormFactor::HPlus => self.h_plus = value,
            FormFactor::HPerp => self.h_perp = value,
            FormFactor::HTildePlus => self.ht_plus = value,
            FormFactor::HTildePerp => self.ht_perp = value,
        }
    }

    /// Returns the value stored for the given form factor.
    pub fn get(&self, ff: FormFactor) -> f64 {
        match ff {
            FormFactor::F0 => self.f0,
            FormFactor::FPlus => self.f_plus,
            FormFactor::FPerp => self.f_perp,
            FormFactor::G0 => self.g0,
            FormFactor::GPlus => self.g_plus,
            FormFactor::GPerp => self.g_perp,
            FormFactor::HPlus => self.h_plus,
            FormFactor::HPerp => self.h_perp,
            FormFactor::HTildePlus => self.ht_plus,
            FormFactor::HTildePerp => self.ht_perp,
        }
    }
}

fn t_plus(params: &ParameterPoint) -> Result<f64, BslError> {
    let m_b0 = params.get("m_B0")?;
    let m_k0 = params.get("m_K0")?;
    Ok((m_b0 + m_k0) * (m_b0 + m_k0))
}

fn t_zero(params: &ParameterPoint) -> Result<f64, BslError> {
    let m_lb = params.get("m_Lambdab")?;
    let m_l = params.get("m_Lambda")?;
    Ok((m_lb - m_l) * (m_lb - m_l))
}

/// Conformal variable of the expansion.
fn z_of(q2: f64, t_plus: f64, t_zero: f64) -> f64 {
    let a = (t_plus - q2).sqrt();
    let b = (t_plus - t_zero).sqrt();
    (a - b) / (a + b)
}

/// Evaluates all ten form factors at q² from the two-coefficient z-expansion.
///
/// The fit is constructed for the physical decay region; q² outside
/// [0, (mΛb − mΛ)²] is an error, never an extrapolation.
pub fn evaluate(params: &ParameterPoint, q2: f64) -> Result<FormFactorSet, BslError> {
    let tp = t_plus(params)?;
    let t0 = t_zero(params)?;
    if !(q2.is_finite() && (0.0..=t0).contains(&q2)) {
        return Err(BslError::FormFactor(
            ErrorDetail::new("out-of-range", "q2 outside the form-factor fit window")
                .with("q2", q2)
                .with("t0", t0),
        ));
    }
    let z = z_of(q2, tp, t0);
    let mut set = FormFactorSet::default();
    for ff in FormFactor::ALL {
        let a0 = params.get(&ff.coefficient_name(0))?;
        let a1 = params.get(&ff.coefficient_name(1))?;
        let pole = ff.pole_mass();
        let value = (a0 + a1 * z) / (1.0 - q2 / (pole * pole));
        if !value.is_finite() {
            return Err(BslError::FormFactor(
                ErrorDetail::new("non-finite-form-factor", "form factor evaluated non-finite")
                    .with("form_factor", ff.label())
                    .with("q2", q2),
            ));
        }
        set.set(ff, value);
    }
    Ok(set)
}

// Central values of the nominal lattice fit snapshot, (a0, a1) per form
// factor in the order of FormFactor::ALL.
const NOMINAL: [(f64, f64); 10] = [
    (0.3725, -0.9389),
    (0.4221, -1.1386),
    (0.5182, -1.3495),
    (0.4028, -1.0290),
    (0.3563, -1.0612),
    (0.3563, -1.1357),
    (0.4960, -1.1275),
    (0.3876, -0.9623),
    (0.3403, -0.7697),
    (0.3403, -0.8008),
];

/// Installs the nominal lattice-fit central values into the store.
pub fn lattice_load_nominal(store: ParameterStore) -> ParameterStore {
    let mut store = store;
    for (ff, (a0, a1)) in FormFactor::ALL.iter().zip(NOMINAL.iter()) {
        store = store
            .set_constraint(&ff.coefficient_name(0), *a0)
            .set_constraint(&ff.coefficient_name(1), *a1);
    }
    store
}
