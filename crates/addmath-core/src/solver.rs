//! Boundary to the remote solving service.
//!
//! This module assembles requests and records answers. Transport lives
//! behind the [`Solver`] trait so the host decides how the call is made.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::strip_mime_header;
use crate::store::{
    add_problem, iso_timestamp, timestamp_id, Language, MathProblem, StateStore, StoreError, User,
};

pub const MODEL: &str = "gemini-3-flash-preview";
pub const TEMPERATURE: f32 = 0.4;
pub const DEFAULT_PROMPT: &str = "Please solve this Additional Mathematics problem step-by-step.";
pub const EMPTY_SOLUTION: &str = "No solution generated.";

/// Images are always sent as JPEG; the crop pipeline only produces JPEG.
const IMAGE_MIME: &str = "image/jpeg";

#[derive(Debug, Error)]
pub enum SolveError {
    #[error("Please provide a photo or type your problem.")]
    EmptyRequest,

    #[error("Network error occurred: {0}")]
    Service(String),
}

/// Error from [`submit_problem`].
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One content part of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Part {
    InlineData {
        #[serde(rename = "mimeType")]
        mime_type: String,
        /// Base64 payload without the data URL header.
        data: String,
    },
    Text(String),
}

/// A fully assembled solving request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    pub model: String,
    pub system_instruction: String,
    pub temperature: f32,
    pub parts: Vec<Part>,
    pub language: Language,
}

impl SolveRequest {
    /// Build a request from a cropped image data URL and/or typed text.
    ///
    /// The image part comes first. Without text, the image is accompanied
    /// by [`DEFAULT_PROMPT`].
    pub fn new(
        image: Option<&str>,
        text: Option<&str>,
        language: Language,
    ) -> Result<Self, SolveError> {
        let image = image.filter(|s| !s.is_empty());
        let text = text.filter(|s| !s.trim().is_empty());

        let mut parts = Vec::with_capacity(2);
        if let Some(url) = image {
            parts.push(Part::InlineData {
                mime_type: IMAGE_MIME.to_string(),
                data: strip_mime_header(url).to_string(),
            });
        }
        match (text, image) {
            (Some(text), _) => parts.push(Part::Text(text.to_string())),
            (None, Some(_)) => parts.push(Part::Text(DEFAULT_PROMPT.to_string())),
            (None, None) => return Err(SolveError::EmptyRequest),
        }

        Ok(Self {
            model: MODEL.to_string(),
            system_instruction: system_instruction(language),
            temperature: TEMPERATURE,
            parts,
            language,
        })
    }

    pub fn has_image(&self) -> bool {
        self.parts
            .iter()
            .any(|p| matches!(p, Part::InlineData { .. }))
    }
}

/// Tutor persona and output format sent with every request.
pub fn system_instruction(language: Language) -> String {
    format!(
        "You are an expert Additional Mathematics tutor for the Malaysian SPM syllabus.
The user is a student who needs a step-by-step solution to a math problem.

Guidelines:
1. Identify the specific SPM Additional Mathematics topic (e.g., Circular Measure, Coordinate Geometry, Differentiation, etc.).
2. Provide a clear, structured, step-by-step solution.
3. Use both {lang} and its equivalent in the other language where technical terms are used (dual-language approach).
4. If it's an image, perform OCR first to extract the question text accurately.
5. Maintain a supportive and encouraging tone.
6. If the input is not a math problem, politely inform the user and ask for a math-related query.

Output Format:
TOPIC: [Topic Name]
QUESTION: [The extracted text of the question]
SOLUTION:
Step 1: ...
Step 2: ...
Final Answer: ...",
        lang = language.as_str()
    )
}

/// Anything that can answer a [`SolveRequest`].
pub trait Solver {
    /// Free-text answer; may be empty.
    fn solve(&self, request: &SolveRequest) -> Result<String, SolveError>;
}

/// The `TOPIC:` line of an answer, if the model produced one.
pub fn extract_topic(solution: &str) -> Option<String> {
    solution.lines().find_map(|line| {
        let line = line.trim().trim_start_matches(['*', '#', ' ']);
        let rest = line.strip_prefix("TOPIC:")?;
        let topic = rest.trim().trim_end_matches('*').trim();
        (!topic.is_empty()).then(|| topic.to_string())
    })
}

/// Turn a service answer into a problem record.
pub fn build_problem(
    user: &User,
    image: Option<&str>,
    text: Option<&str>,
    language: Language,
    solution: &str,
    now: DateTime<Utc>,
) -> MathProblem {
    let solution = if solution.trim().is_empty() {
        EMPTY_SOLUTION.to_string()
    } else {
        solution.to_string()
    };

    MathProblem {
        problem_id: timestamp_id(now),
        user_id: user.user_id.clone(),
        image_url: image.filter(|s| !s.is_empty()).map(str::to_string),
        question_text: text.filter(|s| !s.trim().is_empty()).map(str::to_string),
        topic: extract_topic(&solution),
        solution,
        language,
        submission_time: iso_timestamp(now),
    }
}

/// Solve and record a problem for `user`.
///
/// Nothing is saved when the request is empty or the service fails.
pub fn submit_problem<S, V>(
    store: &S,
    solver: &V,
    user: &User,
    image: Option<&str>,
    text: Option<&str>,
    language: Language,
    now: DateTime<Utc>,
) -> Result<MathProblem, SubmitError>
where
    S: StateStore + ?Sized,
    V: Solver + ?Sized,
{
    let request = SolveRequest::new(image, text, language)?;
    tracing::debug!(
        has_image = request.has_image(),
        language = language.as_str(),
        "submitting problem"
    );

    let solution = solver.solve(&request)?;
    let problem = build_problem(user, image, text, language, &solution, now);
    add_problem(store, problem.clone())?;
    Ok(problem)
}
