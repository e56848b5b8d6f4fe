//! Run digest
//!
//! A SHA-256 fingerprint over the canonical JSON form of any serializable
//! value. Two runs with equal `(jobs, config)` must produce the same
//! `RunResult`, so comparing digests is a cheap reproducibility check across
//! processes and machines.

use crate::orchestrator::SimulationError;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Compute the hex SHA-256 digest of `value`
///
/// Object keys are sorted before hashing so the digest does not depend on
/// field or map iteration order.
pub fn compute_digest<T: Serialize>(value: &T) -> Result<String, SimulationError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(value)
        .map_err(|e| SimulationError::Serialization(format!("digest input: {}", e)))?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value))
        .map_err(|e| SimulationError::Serialization(format!("digest encoding: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
