//! Solving-service bindings.
//!
//! The network call itself is made by the host with `fetch`; these bindings
//! build the request body and record the answer.
//!
//! ```typescript
//! const request = build_solve_request(croppedImage, question, 'English');
//! const answer = await callModel(request);
//! record_solution(croppedImage, question, 'English', answer);
//! ```

use addmath_core::solver::{build_problem, SolveRequest};
use addmath_core::store::{self, Language};
use chrono::Utc;
use wasm_bindgen::prelude::*;

use crate::store::{current_user, open_store, to_js};

fn parse_language(value: &str) -> Result<Language, String> {
    match value {
        "English" => Ok(Language::English),
        "Malay" => Ok(Language::Malay),
        other => Err(format!("Unsupported language: {}", other)),
    }
}

/// Request body `{model, systemInstruction, temperature, parts, language}`.
///
/// # Errors
///
/// Fails when neither an image nor text is given.
#[wasm_bindgen]
pub fn build_solve_request(
    image: Option<String>,
    text: Option<String>,
    language: &str,
) -> Result<JsValue, JsValue> {
    let language = parse_language(language).map_err(|e| JsValue::from_str(&e))?;
    let request = SolveRequest::new(image.as_deref(), text.as_deref(), language)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&request)
}

/// Store the service answer as a new problem for the signed-in user.
#[wasm_bindgen]
pub fn record_solution(
    image: Option<String>,
    text: Option<String>,
    language: &str,
    solution: &str,
) -> Result<JsValue, JsValue> {
    let language = parse_language(language).map_err(|e| JsValue::from_str(&e))?;
    let store = open_store()?;
    let user = current_user(&store)?;

    let problem = build_problem(
        &user,
        image.as_deref(),
        text.as_deref(),
        language,
        solution,
        Utc::now(),
    );
    store::add_problem(&store, problem.clone()).map_err(|e| JsValue::from_str(&e.to_string()))?;
    tracing::debug!(problem_id = %problem.problem_id, "recorded solution");
    to_js(&problem)
}
