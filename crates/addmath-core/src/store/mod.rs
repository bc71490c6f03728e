//! Persisted application state.
//!
//! The whole document lives under a single key and is read in full and
//! written in full. Callers receive a [`StateStore`] rather than reaching
//! for a global, so the same logic runs against browser storage, a JSON
//! file or memory.

mod backend;
mod migrate;
mod model;
mod ops;

pub use backend::{DocumentBackend, FileStore, MemoryStore};
pub use migrate::{migrate, CURRENT_SCHEMA_VERSION};
pub use model::{
    iso_timestamp, timestamp_id, AppState, Feedback, Language, MathProblem, User, UserRole,
};
pub use ops::{
    add_feedback, add_problem, clear_auth, set_current_user, submit_feedback, update_user,
    upgrade_to_premium, UserUpdate,
};

use thiserror::Error;

/// Key the document is stored under.
pub const STORAGE_KEY: &str = "addmathai_data";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored state is malformed: {0}")]
    Malformed(String),

    #[error("Stored state has unsupported schema version {0}")]
    UnsupportedVersion(u32),

    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Load and save the application document.
pub trait StateStore {
    /// Current document; an empty state when nothing has been saved yet.
    fn load(&self) -> Result<AppState, StoreError>;

    /// Replace the stored document.
    fn save(&self, state: &AppState) -> Result<(), StoreError>;
}

/// Parse a raw document, migrating it to the current schema.
pub fn decode_document(raw: &str) -> Result<AppState, StoreError> {
    let doc: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| StoreError::Malformed(e.to_string()))?;
    let doc = migrate(doc)?;
    serde_json::from_value(doc).map_err(|e| StoreError::Malformed(e.to_string()))
}

pub fn encode_document(state: &AppState) -> Result<String, StoreError> {
    Ok(serde_json::to_string(state)?)
}

impl<B: DocumentBackend> StateStore for B {
    fn load(&self) -> Result<AppState, StoreError> {
        match self.read()? {
            Some(raw) => decode_document(&raw),
            None => Ok(AppState::default()),
        }
    }

    fn save(&self, state: &AppState) -> Result<(), StoreError> {
        let raw = encode_document(state)?;
        self.write(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const V0_DOCUMENT: &str = r#"{
        "currentUser": {
            "userId": "k3j9x1a",
            "name": "Aina",
            "email": "aina@example.com",
            "age": 17,
            "role": "Student",
            "joinedAt": "2025-01-02T03:04:05.000Z"
        },
        "problems": [],
        "feedbacks": []
    }"#;

    #[test]
    fn test_decode_migrates_legacy_document() {
        let state = decode_document(V0_DOCUMENT).unwrap();
        let user = state.current_user.unwrap();

        assert!(!user.is_premium);
        assert_eq!(user.name, "Aina");
        assert_eq!(state.schema_version, CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode_document("not json"), Err(StoreError::Malformed(_))));
    }

    #[test]
    fn test_decode_rejects_missing_fields() {
        let raw = r#"{"schemaVersion": 1, "currentUser": null}"#;
        assert!(matches!(decode_document(raw), Err(StoreError::Malformed(_))));
    }

    #[test]
    fn test_encode_decode_preserves_state() {
        let mut state = decode_document(V0_DOCUMENT).unwrap();
        state.feedbacks.push(Feedback {
            feedback_id: "1".into(),
            user_id: "k3j9x1a".into(),
            user_name: "Aina".into(),
            feedback_text: "Bagus!".into(),
            submission_time: "2025-01-03T00:00:00.000Z".into(),
        });

        let raw = encode_document(&state).unwrap();
        assert!(raw.contains("\"schemaVersion\":1"));
        assert_eq!(decode_document(&raw).unwrap(), state);
    }
}
