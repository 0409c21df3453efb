#![deny(missing_docs)]
#![doc = "Parameter store, Wilson-coefficient container, CKM matrix and running couplings."]

mod ckm;
mod params;
pub mod running;
pub mod wilson;

pub use ckm::{xi, CkmMatrix, DownTransition, UpQuark};
pub use params::ParameterStore;
pub use wilson::{sm_coefficients, with_shift, MU_B};

use bsl_core::Transversity;

const SLOTS: [Transversity; 4] = [
    Transversity::Para0,
    Transversity::Para1,
    Transversity::Perp0,
    Transversity::Perp1,
];

/// Names of the subleading-correction parameters, one complex value per
/// transversity slot for each of the two q² regions.
pub fn subleading_names() -> Vec<String> {
    let mut names = Vec::with_capacity(16);
    for slot in SLOTS {
        for part in ["Re", "Im"] {
            names.push(format!("Lambdab->Lambda deltaC7 a_{} {part}", slot.label()));
            names.push(format!("Lambdab->Lambda deltaC9 b_{} {part}", slot.label()));
        }
    }
    names
}
