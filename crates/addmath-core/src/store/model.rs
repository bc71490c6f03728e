//! Records held in the persisted application document.
//!
//! Field names serialise in camelCase to stay readable by the front-end
//! that shares the document.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::migrate::CURRENT_SCHEMA_VERSION;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UserRole {
    #[default]
    Student,
    Admin,
}

/// Answer language for the solving service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Malay,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Malay => "Malay",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub role: UserRole,
    pub joined_at: String,
    /// Missing in records written before the premium tier existed.
    #[serde(default)]
    pub is_premium: bool,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MathProblem {
    pub problem_id: String,
    pub user_id: String,
    /// Cropped photo as a data URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_text: Option<String>,
    pub solution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    pub language: Language,
    pub submission_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub feedback_id: String,
    pub user_id: String,
    pub user_name: String,
    pub feedback_text: String,
    pub submission_time: String,
}

/// The whole persisted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub schema_version: u32,
    pub current_user: Option<User>,
    pub problems: Vec<MathProblem>,
    pub feedbacks: Vec<Feedback>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            current_user: None,
            problems: Vec::new(),
            feedbacks: Vec::new(),
        }
    }
}

/// ISO 8601 timestamp with millisecond precision and a `Z` suffix, the
/// format `Date.prototype.toISOString` produces.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Identifier derived from a timestamp in milliseconds.
pub fn timestamp_id(at: DateTime<Utc>) -> String {
    at.timestamp_millis().to_string()
}
