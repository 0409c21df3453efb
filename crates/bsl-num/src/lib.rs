#![deny(missing_docs)]
#![doc = "Deterministic adaptive quadrature used to form bin-averaged observables."]

mod quad;

pub use quad::{integrate, QuadratureOutcome, QuadratureSpec};
