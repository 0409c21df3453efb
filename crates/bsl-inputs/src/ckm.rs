use bsl_core::errors::BslError;
use bsl_core::ParameterPoint;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Up-type quark tag for CKM combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpQuark {
    /// u quark.
    Up,
    /// c quark.
    Charm,
    /// t quark.
    Top,
}

/// Down-type transition tag for CKM combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownTransition {
    /// b → d transition.
    Bd,
    /// b → s transition.
    Bs,
}

/// CKM matrix in the standard parameterization, built from the tree-level
/// inputs (Vus, Vub, Vcb, γ).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CkmMatrix {
    v: [[Complex64; 3]; 3],
}

impl CkmMatrix {
    /// Constructs the matrix from the parameter point.
    pub fn from_tree_inputs(params: &ParameterPoint) -> Result<Self, BslError> {
        let vus = params.get("Vus")?;
        let vub = params.get("Vub")?;
        let vcb = params.get("Vcb")?;
        let gamma = params.get("gamma")?;

        let s13 = vub;
        let c13 = (1.0 - s13 * s13).sqrt();
        let s12 = vus / c13;
        let c12 = (1.0 - s12 * s12).sqrt();
        let s23 = vcb / c13;
        let c23 = (1.0 - s23 * s23).sqrt();
        let phase = Complex64::from_polar(1.0, gamma);
        let phase_conj = phase.conj();

        let re = Complex64::new;
        let v = [
            [
                re(c12 * c13, 0.0),
                re(s12 * c13, 0.0),
                s13 * phase_conj,
            ],
            [
                re(-s12 * c23, 0.0) - c12 * s23 * s13 * phase,
                re(c12 * c23, 0.0) - s12 * s23 * s13 * phase,
                re(s23 * c13, 0.0),
            ],
            [
                re(s12 * s23, 0.0) - c12 * c23 * s13 * phase,
                re(-c12 * s23, 0.0) - s12 * c23 * s13 * phase,
                re(c23 * c13, 0.0),
            ],
        ];
        Ok(Self { v })
    }

    /// Returns the matrix element for the given row (up-type) and column.
    fn row(&self, up: UpQuark) -> &[Complex64; 3] {
        match up {
            UpQuark::Up => &self.v[0],
            UpQuark::Charm => &self.v[1],
            UpQuark::Top => &self.v[2],
        }
    }

    /// The combination V_qb · V*_qd(s) entering b → d(s) amplitudes.
    pub fn xi(&self, up: UpQuark, transition: DownTransition) -> Complex64 {
        let row = self.row(up);
        let spectator = match transition {
            DownTransition::Bd => row[0],
            DownTransition::Bs => row[1],
        };
        row[2] * spectator.conj()
    }
}

/// Convenience wrapper resolving the matrix and the combination in one step.
pub fn xi(
    params: &ParameterPoint,
    up: UpQuark,
    transition: DownTransition,
) -> Result<Complex64, BslError> {
    Ok(CkmMatrix::from_tree_inputs(params)?.xi(up, transition))
}
