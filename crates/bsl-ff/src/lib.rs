#![deny(missing_docs)]
#![doc = "Lambdab -> Lambda form factors from the two-coefficient lattice z-expansion."]

mod zexp;

pub use zexp::{evaluate, lattice_load_nominal, FormFactor, FormFactorSet};
