use std::collections::BTreeMap;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::errors::{BslError, ErrorDetail};

fn parameter_error(code: &str, message: impl Into<String>) -> BslError {
    BslError::Parameter(ErrorDetail::new(code, message))
}

fn coefficient_error(code: &str, message: impl Into<String>) -> BslError {
    BslError::Coefficient(ErrorDetail::new(code, message))
}

fn kinematics_error(detail: ErrorDetail) -> BslError {
    BslError::Kinematics(detail)
}

/// Immutable mapping from parameter name to its central value.
///
/// Every parameter referenced by a computation must resolve; an unresolved
/// lookup is a fatal configuration error, never a silent default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ParameterPoint {
    values: BTreeMap<String, f64>,
}

impl ParameterPoint {
    /// Builds a point from name/value pairs.
    pub fn from_values(values: BTreeMap<String, f64>) -> Self {
        Self { values }
    }

    /// Resolves a parameter by name.
    pub fn get(&self, name: &str) -> Result<f64, BslError> {
        self.values.get(name).copied().ok_or_else(|| {
            parameter_error("missing-parameter", format!("parameter `{name}` is not defined"))
        })
    }

    /// Resolves a whole set of names at once.
    ///
    /// The first unresolved name aborts the resolution, so a computation can
    /// declare its inputs up front and fail before any arithmetic.
    pub fn resolve(&self, names: &[&str]) -> Result<BTreeMap<String, f64>, BslError> {
        names
            .iter()
            .map(|name| Ok((name.to_string(), self.get(name)?)))
            .collect()
    }

    /// Returns whether the point defines the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of defined parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether the point is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the defined parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

/// Immutable mapping from Wilson-coefficient name to its complex value at a
/// fixed renormalization scale.
///
/// The coefficient namespace is distinct from [`ParameterPoint`]; the two are
/// never conflated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientPoint {
    scale: f64,
    values: BTreeMap<String, Complex64>,
}

impl CoefficientPoint {
    /// Builds a point from name/value pairs at the given scale.
    pub fn from_values(scale: f64, values: BTreeMap<String, Complex64>) -> Self {
        Self { scale, values }
    }

    /// Renormalization scale the values refer to, in GeV.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Resolves a coefficient by name.
    pub fn get(&self, name: &str) -> Result<Complex64, BslError> {
        self.values.get(name).copied().ok_or_else(|| {
            coefficient_error(
                "missing-coefficient",
                format!("Wilson coefficient `{name}` is not defined"),
            )
        })
    }

    /// Resolves a whole set of names at once, failing on the first gap.
    pub fn resolve(&self, names: &[&str]) -> Result<BTreeMap<String, Complex64>, BslError> {
        names
            .iter()
            .map(|name| Ok((name.to_string(), self.get(name)?)))
            .collect()
    }

    /// Returns a copy with every coefficient complex-conjugated.
    ///
    /// Weak phases flip under CP; the conjugated point is what an amplitude
    /// evaluation for the charge-conjugate decay consumes.
    pub fn conjugated(&self) -> Self {
        Self {
            scale: self.scale,
            values: self
                .values
                .iter()
                .map(|(name, value)| (name.clone(), value.conj()))
                .collect(),
        }
    }

    /// Iterates over the defined coefficients in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Complex64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

/// CP state of the decay an evaluation refers to.
///
/// Propagated by value through every layer; never a global toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CpState {
    /// The decay itself.
    #[default]
    Particle,
    /// The charge-conjugate decay.
    Antiparticle,
}

impl CpState {
    /// Returns the conjugate state.
    pub fn flipped(self) -> Self {
        match self {
            CpState::Particle => CpState::Antiparticle,
            CpState::Antiparticle => CpState::Particle,
        }
    }

    /// Whether this state refers to the charge-conjugate decay.
    pub fn is_conjugate(self) -> bool {
        self == CpState::Antiparticle
    }
}

/// Transversity index of a decay amplitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transversity {
    /// Longitudinal, parity-even.
    Para0,
    /// Transverse, parity-even.
    Para1,
    /// Longitudinal, parity-odd.
    Perp0,
    /// Transverse, parity-odd.
    Perp1,
}

impl Transversity {
    /// Canonical label used in parameter names and reports.
    pub fn label(self) -> &'static str {
        match self {
            Transversity::Para0 => "para0",
            Transversity::Para1 => "para1",
            Transversity::Perp0 => "perp0",
            Transversity::Perp1 => "perp1",
        }
    }
}

/// Chirality of the lepton pair an amplitude couples to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Chirality {
    /// Left-handed lepton current.
    L,
    /// Right-handed lepton current.
    R,
}

impl Chirality {
    /// Canonical label used in parameter names and reports.
    pub fn label(self) -> &'static str {
        match self {
            Chirality::L => "L",
            Chirality::R => "R",
        }
    }
}

/// Key into a [`TransversityAmplitudeSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AmplitudeKey {
    /// Transversity index of the slot.
    pub transversity: Transversity,
    /// Lepton-pair chirality of the slot.
    pub chirality: Chirality,
}

impl AmplitudeKey {
    /// Creates a key from its components.
    pub const fn new(transversity: Transversity, chirality: Chirality) -> Self {
        Self {
            transversity,
            chirality,
        }
    }

    /// All eight keys in canonical storage order.
    pub const ALL: [AmplitudeKey; 8] = [
        AmplitudeKey::new(Transversity::Para0, Chirality::L),
        AmplitudeKey::new(Transversity::Para1, Chirality::L),
        AmplitudeKey::new(Transversity::Perp0, Chirality::L),
        AmplitudeKey::new(Transversity::Perp1, Chirality::L),
        AmplitudeKey::new(Transversity::Para0, Chirality::R),
        AmplitudeKey::new(Transversity::Para1, Chirality::R),
        AmplitudeKey::new(Transversity::Perp0, Chirality::R),
        AmplitudeKey::new(Transversity::Perp1, Chirality::R),
    ];

    fn slot(self) -> usize {
        let base = match self.transversity {
            Transversity::Para0 => 0,
            Transversity::Para1 => 1,
            Transversity::Perp0 => 2,
            Transversity::Perp1 => 3,
        };
        match self.chirality {
            Chirality::L => base,
            Chirality::R => base + 4,
        }
    }
}

/// The eight transversity amplitudes of the decay at one q² point.
///
/// Always fully populated: every consumer receives all eight slots even when
/// several carry an exactly zero central value. Recomputed at every q² sample,
/// never cached across points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct TransversityAmplitudeSet {
    amps: [Complex64; 8],
}

impl TransversityAmplitudeSet {
    /// The all-zero amplitude set.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns the amplitude stored under the given key.
    pub fn get(&self, key: AmplitudeKey) -> Complex64 {
        self.amps[key.slot()]
    }

    /// Stores an amplitude under the given key.
    pub fn set(&mut self, key: AmplitudeKey, value: Complex64) {
        self.amps[key.slot()] = value;
    }

    /// Iterates over all eight slots in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (AmplitudeKey, Complex64)> + '_ {
        AmplitudeKey::ALL.iter().map(move |&key| (key, self.get(key)))
    }

    /// Pointwise sum of two sets (used for additive subleading corrections).
    pub fn added(&self, other: &Self) -> Self {
        let mut out = *self;
        for (slot, value) in out.amps.iter_mut().zip(other.amps.iter()) {
            *slot += value;
        }
        out
    }

    /// Returns whether every slot is finite.
    pub fn is_finite(&self) -> bool {
        self.amps
            .iter()
            .all(|amp| amp.re.is_finite() && amp.im.is_finite())
    }
}

/// Physically allowed q² window of the channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalWindow {
    /// Lepton-pair production threshold, 4 mℓ².
    pub q2_floor: f64,
    /// Kinematic endpoint, (m_parent − m_daughter)².
    pub q2_ceiling: f64,
}

impl PhysicalWindow {
    /// Builds the window from the lepton and baryon masses.
    pub fn for_masses(m_lepton: f64, m_parent: f64, m_daughter: f64) -> Self {
        Self {
            q2_floor: 4.0 * m_lepton * m_lepton,
            q2_ceiling: (m_parent - m_daughter) * (m_parent - m_daughter),
        }
    }

    /// Checks that a q² value lies strictly inside the window.
    pub fn check(&self, q2: f64) -> Result<(), BslError> {
        if !(q2.is_finite() && q2 > 0.0) {
            return Err(kinematics_error(
                ErrorDetail::new("invalid-q2", "q2 must be finite and positive").with("q2", q2),
            ));
        }
        if q2 < self.q2_floor || q2 > self.q2_ceiling {
            return Err(kinematics_error(
                ErrorDetail::new("q2-outside-window", "q2 outside the physical window")
                    .with("q2", q2)
                    .with("floor", self.q2_floor)
                    .with("ceiling", self.q2_ceiling),
            ));
        }
        Ok(())
    }
}

/// A closed q² integration interval.
///
/// Construction validates ordering and finiteness; a degenerate interval is a
/// configuration error, not a silent zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicBin {
    q2min: f64,
    q2max: f64,
}

impl KinematicBin {
    /// Creates a bin, rejecting malformed or degenerate intervals.
    pub fn new(q2min: f64, q2max: f64) -> Result<Self, BslError> {
        if !(q2min.is_finite() && q2max.is_finite()) {
            return Err(kinematics_error(
                ErrorDetail::new("non-finite-bin", "bin edges must be finite")
                    .with("q2min", q2min)
                    .with("q2max", q2max),
            ));
        }
        if q2min >= q2max {
            let code = if q2min == q2max {
                "degenerate-bin"
            } else {
                "inverted-bin"
            };
            return Err(kinematics_error(
                ErrorDetail::new(code, "bin requires q2min < q2max")
                    .with("q2min", q2min)
                    .with("q2max", q2max),
            ));
        }
        Ok(Self { q2min, q2max })
    }

    /// Lower bin edge.
    pub fn q2min(&self) -> f64 {
        self.q2min
    }

    /// Upper bin edge.
    pub fn q2max(&self) -> f64 {
        self.q2max
    }

    /// Bin width.
    pub fn width(&self) -> f64 {
        self.q2max - self.q2min
    }

    /// Checks that both edges lie inside the physical window.
    pub fn check_window(&self, window: &PhysicalWindow) -> Result<(), BslError> {
        window.check(self.q2min)?;
        window.check(self.q2max)?;
        Ok(())
    }
}
