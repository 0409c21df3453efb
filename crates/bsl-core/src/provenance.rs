//! Stable fingerprints of evaluation inputs, attached to prediction reports.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::{BslError, ErrorDetail};
use crate::types::{CoefficientPoint, ParameterPoint};

/// Hashes any serializable payload into a short hex digest.
///
/// Payloads are rendered through canonical JSON (maps are `BTreeMap`-backed,
/// so key order is stable) before hashing.
pub fn stable_fingerprint<T: Serialize>(payload: &T) -> Result<String, BslError> {
    let bytes = serde_json::to_vec(payload).map_err(|err| {
        BslError::Numerics(
            ErrorDetail::new("fingerprint-encode", "failed to encode payload for fingerprinting")
                .with("source", err),
        )
    })?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let digest = hasher.finalize();
    Ok(hex_prefix(&digest, 16))
}

fn hex_prefix(bytes: &[u8], len: usize) -> String {
    let mut out = String::with_capacity(len * 2);
    for byte in bytes.iter().take(len) {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

/// Fingerprints of the two input points of an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InputFingerprints {
    /// Digest of the parameter point.
    pub parameters: String,
    /// Digest of the coefficient point.
    pub coefficients: String,
}

impl InputFingerprints {
    /// Computes fingerprints for the given input points.
    pub fn of(params: &ParameterPoint, wc: &CoefficientPoint) -> Result<Self, BslError> {
        Ok(Self {
            parameters: stable_fingerprint(params)?,
            coefficients: stable_fingerprint(wc)?,
        })
    }
}
