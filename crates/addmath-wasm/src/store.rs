//! Browser `localStorage` backend and the state bindings built on it.
//!
//! Every binding opens the store, applies one mutation and returns the
//! resulting value as a plain JSON-compatible object.

use addmath_core::profile::{register_profile, user_id_from_fraction, ProfileForm};
use addmath_core::stats::{AdminSummary, DashboardSummary};
use addmath_core::store::{
    self, DocumentBackend, StateStore, StoreError, UserUpdate, STORAGE_KEY,
};
use chrono::Utc;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// The application document in `window.localStorage`.
pub struct LocalStorageStore {
    storage: web_sys::Storage,
    key: String,
}

impl LocalStorageStore {
    /// Open the default `addmathai_data` entry.
    pub fn open() -> Result<Self, StoreError> {
        Self::open_key(STORAGE_KEY)
    }

    pub fn open_key(key: &str) -> Result<Self, StoreError> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))?;
        Ok(Self {
            storage,
            key: key.to_string(),
        })
    }
}

impl DocumentBackend for LocalStorageStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(&self.key)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }

    fn write(&self, raw: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(&self.key, raw)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }
}

pub(crate) fn open_store() -> Result<LocalStorageStore, JsValue> {
    LocalStorageStore::open().map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Serialize as plain objects with `null` for missing values.
pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The stored document, migrated to the current schema.
#[wasm_bindgen]
pub fn load_state() -> Result<JsValue, JsValue> {
    let state = open_store()?
        .load()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&state)
}

/// Create a profile from the sign-in form and make it the current user.
///
/// `form` is `{mode: "login" | "register", name, email, age, role}`.
#[wasm_bindgen]
pub fn sign_in(form: JsValue) -> Result<JsValue, JsValue> {
    let form: ProfileForm = serde_wasm_bindgen::from_value(form)
        .map_err(|e| JsValue::from_str(&format!("Invalid profile form: {}", e)))?;
    let user_id = user_id_from_fraction(js_sys::Math::random());
    let user = register_profile(&form, user_id, Utc::now())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    store::set_current_user(&open_store()?, user.clone())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&user)
}

#[wasm_bindgen]
pub fn sign_out() -> Result<(), JsValue> {
    store::clear_auth(&open_store()?)
        .map(|_| ())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Merge `{name?, email?, age?, isPremium?}` into the user `user_id`.
#[wasm_bindgen]
pub fn update_user(user_id: &str, update: JsValue) -> Result<JsValue, JsValue> {
    let update: UserUpdate = serde_wasm_bindgen::from_value(update)
        .map_err(|e| JsValue::from_str(&format!("Invalid user update: {}", e)))?;
    let state = store::update_user(&open_store()?, user_id, update)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&state.current_user)
}

#[wasm_bindgen]
pub fn upgrade_to_premium(user_id: &str) -> Result<JsValue, JsValue> {
    let state = store::upgrade_to_premium(&open_store()?, user_id)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&state.current_user)
}

/// Record feedback from the signed-in user. Returns `null` for blank text.
#[wasm_bindgen]
pub fn submit_feedback(text: &str) -> Result<JsValue, JsValue> {
    let store = open_store()?;
    let user = current_user(&store)?;
    let feedback = store::submit_feedback(&store, &user, text, Utc::now())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&feedback)
}

#[wasm_bindgen]
pub fn dashboard_summary() -> Result<JsValue, JsValue> {
    let state = open_store()?
        .load()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&DashboardSummary::from_problems(
        &state.problems,
        Utc::now().date_naive(),
    ))
}

#[wasm_bindgen]
pub fn admin_summary() -> Result<JsValue, JsValue> {
    let state = open_store()?
        .load()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&AdminSummary::from_state(&state))
}

pub(crate) fn current_user<S: StateStore + ?Sized>(store: &S) -> Result<store::User, JsValue> {
    store
        .load()
        .map_err(|e| JsValue::from_str(&e.to_string()))?
        .current_user
        .ok_or_else(|| JsValue::from_str("Not signed in"))
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use addmath_core::store::{AppState, CURRENT_SCHEMA_VERSION};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn scratch_store(key: &str) -> LocalStorageStore {
        let store = LocalStorageStore::open_key(key).unwrap();
        store.storage.remove_item(key).unwrap();
        store
    }

    #[wasm_bindgen_test]
    fn test_missing_entry_loads_empty_state() {
        let store = scratch_store("addmath_test_empty");
        let state = store.load().unwrap();
        assert!(state.current_user.is_none());
        assert!(state.problems.is_empty());
    }

    #[wasm_bindgen_test]
    fn test_save_and_reload() {
        let store = scratch_store("addmath_test_save");
        let state = AppState::default();
        store.save(&state).unwrap();

        assert!(store.read().unwrap().is_some());
        assert_eq!(store.load().unwrap(), state);
    }

    #[wasm_bindgen_test]
    fn test_legacy_entry_is_migrated() {
        let store = scratch_store("addmath_test_legacy");
        store
            .write(
                r#"{"currentUser":{"userId":"a","name":"A","email":"a@b.my","age":17,
                "role":"Student","joinedAt":""},"problems":[],"feedbacks":[]}"#,
            )
            .unwrap();

        let state = store.load().unwrap();
        assert_eq!(state.schema_version, CURRENT_SCHEMA_VERSION);
        assert!(!state.current_user.unwrap().is_premium);
    }
}
