#![deny(missing_docs)]
#![doc = "Observable and auxiliary-quantity registries with central-prediction entry points."]

mod registry;

pub use registry::{
    AuxiliaryKind, AuxiliaryRegistry, ObservableEntry, ObservableRegistry, Prediction,
    PredictionConfig,
};
