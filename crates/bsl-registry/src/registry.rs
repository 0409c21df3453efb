use std::collections::BTreeMap;

use bsl_core::errors::{BslError, ErrorDetail, NumericalWarning};
use bsl_core::{
    CoefficientPoint, CpState, InputFingerprints, KinematicBin, ParameterPoint, PhysicalWindow,
    TransversityAmplitudeSet,
};
use bsl_lambdab::{
    angular_at, denominator_density, numerator_density, subleading_at, transversity_with_corrections,
    AngularIndex, Lepton, ObservableKind, Region, RegionBoundary,
};
use bsl_num::{integrate, QuadratureSpec};
use serde::{Deserialize, Serialize};

fn registry_error(code: &str, message: impl Into<String>) -> BslError {
    BslError::Registry(ErrorDetail::new(code, message))
}

/// Evaluation knobs shared by every registered computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PredictionConfig {
    /// Boundary between the subleading-correction regimes.
    pub boundary: RegionBoundary,
    /// Quadrature tolerances for bin integration.
    pub quadrature: QuadratureSpec,
}

/// One registered observable: its combination rule and final state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservableEntry {
    /// Combination rule of the observable.
    pub kind: ObservableKind,
    /// Charged-lepton flavor of the final state.
    pub lepton: Lepton,
}

/// Central value of one evaluation, with its annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Registry key the evaluation was requested under.
    pub name: String,
    /// Bin-averaged central value.
    pub value: f64,
    /// Non-fatal numerical annotations (tolerance shortfalls).
    pub warnings: Vec<NumericalWarning>,
    /// Fingerprints of the input points.
    pub inputs: InputFingerprints,
}

/// Name-keyed table of observables, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct ObservableRegistry {
    entries: BTreeMap<String, ObservableEntry>,
    config: PredictionConfig,
}

fn observable_key(kind: ObservableKind, lepton: Lepton) -> String {
    format!("<{}>(Lambdab->Lambda{})", kind.label(), lepton.pair_label())
}

impl ObservableRegistry {
    /// Creates an empty registry with the given evaluation knobs.
    pub fn new(config: PredictionConfig) -> Self {
        Self {
            entries: BTreeMap::new(),
            config,
        }
    }

    /// Creates the registry with every observable of the channel registered
    /// for both lepton flavors.
    pub fn with_defaults() -> Self {
        let mut entries = BTreeMap::new();
        for lepton in [Lepton::E, Lepton::Mu] {
            let mut kinds = vec![
                ObservableKind::BranchingRatio,
                ObservableKind::LongitudinalPolarization,
                ObservableKind::LeptonAsymmetry,
                ObservableKind::HadronAsymmetry,
                ObservableKind::CombinedAsymmetry,
            ];
            kinds.extend(
                AngularIndex::ALL
                    .iter()
                    .map(|&index| ObservableKind::AngularCoefficient(index)),
            );
            for kind in kinds {
                entries.insert(observable_key(kind, lepton), ObservableEntry { kind, lepton });
            }
        }
        Self {
            entries,
            config: PredictionConfig::default(),
        }
    }

    /// Registers an observable under a new key.
    pub fn register(&mut self, name: &str, entry: ObservableEntry) -> Result<(), BslError> {
        if self.entries.contains_key(name) {
            return Err(registry_error(
                "duplicate-observable",
                format!("observable `{name}` is already registered"),
            ));
        }
        self.entries.insert(name.to_string(), entry);
        Ok(())
    }

    /// Looks up an observable by key.
    pub fn get(&self, name: &str) -> Result<&ObservableEntry, BslError> {
        self.entries.get(name).ok_or_else(|| {
            BslError::Registry(
                ErrorDetail::new("unknown-observable", format!("no observable named `{name}`"))
                    .hinted("keys follow `<Name>(Lambdab->Lambdall)`"),
            )
        })
    }

    /// Iterates over the registered keys in name order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Evaluates the named observable over a bin at the central point.
    ///
    /// The bin is validated against the physical window before any amplitude
    /// arithmetic; numerator and denominator are integrated separately over
    /// the same bin and combined at the end.
    pub fn predict_central(
        &self,
        name: &str,
        params: &ParameterPoint,
        wc: &CoefficientPoint,
        q2min: f64,
        q2max: f64,
        cp: CpState,
    ) -> Result<Prediction, BslError> {
        let entry = *self.get(name)?;
        let bin = KinematicBin::new(q2min, q2max)?;
        let window = PhysicalWindow::for_masses(
            params.get(entry.lepton.mass_parameter())?,
            params.get("m_Lambdab")?,
            params.get("m_Lambda")?,
        );
        bin.check_window(&window)?;

        let numerator = integrate(
            |q2| {
                let coeffs = angular_at(
                    params,
                    wc,
                    q2,
                    entry.lepton,
                    cp,
                    &self.config.boundary,
                )?;
                numerator_density(entry.kind, params, &coeffs)
            },
            &bin,
            &self.config.quadrature,
        )?;
        let denominator = integrate(
            |q2| {
                let coeffs = angular_at(
                    params,
                    wc,
                    q2,
                    entry.lepton,
                    cp,
                    &self.config.boundary,
                )?;
                Ok(denominator_density(entry.kind, &coeffs))
            },
            &bin,
            &self.config.quadrature,
        )?;

        if denominator.value == 0.0 || !denominator.value.is_finite() {
            return Err(BslError::Numerics(
                ErrorDetail::new("zero-denominator", "normalization integral is not usable")
                    .with("value", denominator.value),
            ));
        }

        let mut warnings = Vec::new();
        warnings.extend(numerator.warning());
        warnings.extend(denominator.warning());

        Ok(Prediction {
            name: name.to_string(),
            value: numerator.value / denominator.value,
            warnings,
            inputs: InputFingerprints::of(params, wc)?,
        })
    }
}

/// One registered auxiliary quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuxiliaryKind {
    /// Subleading correction set of one regime.
    Subleading(Region),
    /// Full transversity amplitude set including corrections.
    TransversityAmplitudes,
}

/// Descriptive-phrase table of auxiliary quantities.
///
/// Same registry discipline as the observables, but the results are
/// structured amplitude sets at a single q², intended for diagnostics and
/// validation rather than physics comparisons.
#[derive(Debug, Clone, Default)]
pub struct AuxiliaryRegistry {
    entries: BTreeMap<String, AuxiliaryKind>,
    config: PredictionConfig,
}

impl AuxiliaryRegistry {
    /// Creates the registry with the channel's auxiliary quantities.
    pub fn with_defaults() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            "Lambdab->Lambdall subleading effects at low q2".to_string(),
            AuxiliaryKind::Subleading(Region::Low),
        );
        entries.insert(
            "Lambdab->Lambdall subleading effects at high q2".to_string(),
            AuxiliaryKind::Subleading(Region::High),
        );
        entries.insert(
            "Lambdab->Lambdall transversity amplitudes".to_string(),
            AuxiliaryKind::TransversityAmplitudes,
        );
        Self {
            entries,
            config: PredictionConfig::default(),
        }
    }

    /// Looks up an auxiliary quantity by phrase.
    pub fn get(&self, name: &str) -> Result<AuxiliaryKind, BslError> {
        self.entries.get(name).copied().ok_or_else(|| {
            registry_error(
                "unknown-auxiliary",
                format!("no auxiliary quantity named `{name}`"),
            )
        })
    }

    /// Iterates over the registered phrases in name order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Evaluates the named auxiliary quantity at one q² point.
    ///
    /// The muon final state fixes the kinematic window of the evaluation.
    pub fn predict_central(
        &self,
        name: &str,
        params: &ParameterPoint,
        wc: &CoefficientPoint,
        q2: f64,
        cp: CpState,
    ) -> Result<TransversityAmplitudeSet, BslError> {
        let kind = self.get(name)?;
        match kind {
            AuxiliaryKind::Subleading(region) => {
                subleading_at(params, wc, q2, Lepton::Mu, cp, region)
            }
            AuxiliaryKind::TransversityAmplitudes => transversity_with_corrections(
                params,
                wc,
                q2,
                Lepton::Mu,
                cp,
                &self.config.boundary,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_contains_the_channel_surface() {
        let registry = ObservableRegistry::with_defaults();
        for key in [
            "<dBR/dq2>(Lambdab->Lambdamumu)",
            "<FL>(Lambdab->Lambdamumu)",
            "<AFBl>(Lambdab->Lambdamumu)",
            "<AFBh>(Lambdab->Lambdaee)",
            "<K1ss>(Lambdab->Lambdamumu)",
            "<K34>(Lambdab->Lambdaee)",
        ] {
            assert!(registry.get(key).is_ok(), "{key}");
        }
        // 5 derived + 34 angular, for two lepton flavors.
        assert_eq!(registry.names().count(), 78);
    }

    #[test]
    fn unknown_names_fail_with_a_registry_error() {
        let registry = ObservableRegistry::with_defaults();
        let err = registry.get("<S5>(Lambdab->Lambdamumu)").unwrap_err();
        assert_eq!(err.detail().code, "unknown-observable");
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = ObservableRegistry::with_defaults();
        let entry = ObservableEntry {
            kind: ObservableKind::BranchingRatio,
            lepton: Lepton::Mu,
        };
        let err = registry
            .register("<dBR/dq2>(Lambdab->Lambdamumu)", entry)
            .unwrap_err();
        assert_eq!(err.detail().code, "duplicate-observable");
    }
}
