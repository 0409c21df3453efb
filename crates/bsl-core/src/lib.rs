#![deny(missing_docs)]
#![doc = "Core types and structured errors for the bsl prediction engine."]

pub mod errors;
pub mod provenance;
mod types;

pub use errors::{BslError, ErrorDetail, NumericalWarning};
pub use provenance::{stable_fingerprint, InputFingerprints};
pub use types::{
    AmplitudeKey, Chirality, CoefficientPoint, CpState, KinematicBin, ParameterPoint,
    PhysicalWindow, Transversity, TransversityAmplitudeSet,
};
