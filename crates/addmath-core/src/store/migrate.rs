//! Versioned migration of the persisted document.
//!
//! Documents are migrated as raw JSON before they are deserialised, one
//! step per version, exactly once at load time. Documents written before
//! versioning carry no `schemaVersion` and count as version 0.

use serde_json::{Map, Value};

use super::StoreError;

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

type Step = fn(&mut Map<String, Value>);

/// `STEPS[n]` upgrades a version `n` document to version `n + 1`.
const STEPS: &[Step] = &[default_premium_flag];

/// v0 -> v1: users saved before the premium upgrade lack `isPremium`.
fn default_premium_flag(doc: &mut Map<String, Value>) {
    if let Some(Value::Object(user)) = doc.get_mut("currentUser") {
        user.entry("isPremium").or_insert(Value::Bool(false));
    }
}

/// Bring `doc` up to [`CURRENT_SCHEMA_VERSION`].
pub fn migrate(doc: Value) -> Result<Value, StoreError> {
    let Value::Object(mut map) = doc else {
        return Err(StoreError::Malformed("document is not an object".to_string()));
    };

    let version = match map.get("schemaVersion") {
        None | Some(Value::Null) => 0,
        Some(v) => v
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| StoreError::Malformed(format!("bad schemaVersion: {v}")))?,
    };

    if version > CURRENT_SCHEMA_VERSION {
        return Err(StoreError::UnsupportedVersion(version));
    }

    for (from, step) in STEPS.iter().enumerate().skip(version as usize) {
        tracing::warn!(from, to = from + 1, "migrating stored state");
        step(&mut map);
    }

    map.insert(
        "schemaVersion".to_string(),
        Value::from(CURRENT_SCHEMA_VERSION),
    );
    Ok(Value::Object(map))
}
