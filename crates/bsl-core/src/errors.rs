//! Structured error types shared across the bsl crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`BslError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (names, scales, bin edges, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorDetail {
    /// Creates a new payload from its code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Attaches a context entry to the payload.
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a remediation hint.
    pub fn hinted(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.message, self.code)?;
        for (key, value) in &self.context {
            write!(f, " {key}={value}")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

/// Canonical error type for the bsl prediction engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum BslError {
    /// Unresolved or malformed physical parameter.
    #[error("parameter error: {0}")]
    Parameter(ErrorDetail),
    /// Unresolved or malformed Wilson coefficient.
    #[error("coefficient error: {0}")]
    Coefficient(ErrorDetail),
    /// Malformed bin or kinematics outside the physical window.
    #[error("kinematics error: {0}")]
    Kinematics(ErrorDetail),
    /// Form factor evaluated outside the validity of the fit.
    #[error("form factor error: {0}")]
    FormFactor(ErrorDetail),
    /// Unknown observable or auxiliary quantity name.
    #[error("registry error: {0}")]
    Registry(ErrorDetail),
    /// Non-finite intermediate or other numerical failure.
    #[error("numerics error: {0}")]
    Numerics(ErrorDetail),
}

impl BslError {
    /// Returns the payload describing the error.
    pub fn detail(&self) -> &ErrorDetail {
        match self {
            BslError::Parameter(detail)
            | BslError::Coefficient(detail)
            | BslError::Kinematics(detail)
            | BslError::FormFactor(detail)
            | BslError::Registry(detail)
            | BslError::Numerics(detail) => detail,
        }
    }
}

/// Non-fatal annotation carried alongside a best-effort result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericalWarning {
    /// Stable machine readable warning code.
    pub code: String,
    /// Human readable description of the degradation.
    pub message: String,
    /// Contextual key value pairs (tolerances, evaluation counts, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
}

impl NumericalWarning {
    /// Creates a new warning from its code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
        }
    }

    /// Attaches a context entry to the warning.
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }
}
