use std::collections::BTreeMap;

use bsl_core::ParameterPoint;
use serde::{Deserialize, Serialize};

use crate::subleading_names;

/// Mutable collection of named central values, frozen into a
/// [`ParameterPoint`] before any computation starts.
///
/// Constraints are set during a single build phase; the frozen point is
/// immutable and shared by value afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ParameterStore {
    values: BTreeMap<String, f64>,
}

impl ParameterStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the default central values of the channel.
    ///
    /// Masses and couplings follow the PDG; the Λb lifetime is stored in
    /// GeV⁻¹. Form-factor fit coefficients are not part of the defaults and
    /// must be installed explicitly (see the form-factor crate's nominal
    /// loader), so that a computation without them fails fast instead of
    /// running on silent placeholders.
    pub fn defaults() -> Self {
        let mut store = Self::new();
        // Baryon and meson masses, GeV.
        store.insert("m_Lambdab", 5.619_60);
        store.insert("m_Lambda", 1.115_683);
        store.insert("m_B0", 5.279_63);
        store.insert("m_K0", 0.497_611);
        // Quark masses: MS-bar at their own scale, GeV.
        store.insert("m_b", 4.18);
        store.insert("m_c", 1.27);
        // Lepton masses, GeV.
        store.insert("m_e", 0.000_510_998_946);
        store.insert("m_mu", 0.105_658_374_5);
        store.insert("m_tau", 1.776_86);
        // Electroweak inputs.
        store.insert("GF", 1.166_378_7e-5);
        store.insert("alpha_e", 1.0 / 133.28);
        store.insert("alpha_s", 0.1185);
        store.insert("m_Z", 91.1876);
        // CKM tree-level inputs.
        store.insert("Vus", 0.2243);
        store.insert("Vub", 0.003_715);
        store.insert("Vcb", 0.042_21);
        store.insert("gamma", 1.22);
        // Lifetime in GeV^-1 (PDG 1.471 ps).
        store.insert("tau_Lambdab", 2.234_9e12);
        // Decay asymmetry of the daughter and production polarization.
        store.insert("Lambda->ppi alpha_-", 0.732);
        store.insert("Lambdab polarisation", 0.0);
        // Subleading-correction magnitudes, central value zero.
        for name in subleading_names() {
            store.insert(&name, 0.0);
        }
        store
    }

    fn insert(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }

    /// Sets a named constraint, returning the updated store.
    ///
    /// Unknown names are accepted: downstream components declare what they
    /// need and fail on resolution, so a missing constraint can never be
    /// papered over here.
    pub fn set_constraint(mut self, name: &str, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns whether the store defines the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Freezes the store into the immutable point used by computations.
    pub fn freeze(&self) -> ParameterPoint {
        ParameterPoint::from_values(self.values.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_the_channel_masses() {
        let point = ParameterStore::defaults().freeze();
        assert!((point.get("m_Lambdab").unwrap() - 5.6196).abs() < 1e-9);
        assert!((point.get("m_Lambda").unwrap() - 1.115683).abs() < 1e-9);
        assert!(point.get("Lambdab->Lambda f0 a0").is_err());
    }

    #[test]
    fn set_constraint_overrides_and_freeze_snapshots() {
        let store = ParameterStore::defaults().set_constraint("Vcb", 0.04175);
        let frozen = store.freeze();
        let store = store.set_constraint("Vcb", 0.05);
        assert!((frozen.get("Vcb").unwrap() - 0.04175).abs() < 1e-12);
        assert!((store.freeze().get("Vcb").unwrap() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn subleading_magnitudes_default_to_zero() {
        let point = ParameterStore::defaults().freeze();
        for name in subleading_names() {
            assert_eq!(point.get(&name).unwrap(), 0.0, "{name}");
        }
    }
}
