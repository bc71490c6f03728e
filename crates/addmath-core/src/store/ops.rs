//! Document mutations. Each one loads, changes and saves the whole document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    iso_timestamp, timestamp_id, AppState, Feedback, MathProblem, StateStore, StoreError, User,
};

fn mutate<S, F>(store: &S, change: F) -> Result<AppState, StoreError>
where
    S: StateStore + ?Sized,
    F: FnOnce(&mut AppState),
{
    let mut state = store.load()?;
    change(&mut state);
    store.save(&state)?;
    Ok(state)
}

/// Sign `user` in.
pub fn set_current_user<S: StateStore + ?Sized>(
    store: &S,
    user: User,
) -> Result<AppState, StoreError> {
    mutate(store, |state| state.current_user = Some(user))
}

/// Sign out. Problems and feedback stay.
pub fn clear_auth<S: StateStore + ?Sized>(store: &S) -> Result<AppState, StoreError> {
    mutate(store, |state| state.current_user = None)
}

/// Newest first.
pub fn add_problem<S: StateStore + ?Sized>(
    store: &S,
    problem: MathProblem,
) -> Result<AppState, StoreError> {
    mutate(store, |state| state.problems.insert(0, problem))
}

pub fn add_feedback<S: StateStore + ?Sized>(
    store: &S,
    feedback: Feedback,
) -> Result<AppState, StoreError> {
    mutate(store, |state| state.feedbacks.insert(0, feedback))
}

/// Record feedback from `user`. Blank text is ignored and returns `None`.
pub fn submit_feedback<S: StateStore + ?Sized>(
    store: &S,
    user: &User,
    text: &str,
    now: DateTime<Utc>,
) -> Result<Option<Feedback>, StoreError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    let feedback = Feedback {
        feedback_id: timestamp_id(now),
        user_id: user.user_id.clone(),
        user_name: user.name.clone(),
        feedback_text: text.to_string(),
        submission_time: iso_timestamp(now),
    };
    add_feedback(store, feedback.clone())?;
    Ok(Some(feedback))
}

/// Profile fields a user may change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub is_premium: Option<bool>,
}

impl UserUpdate {
    fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(age) = self.age {
            user.age = age;
        }
        if let Some(is_premium) = self.is_premium {
            user.is_premium = is_premium;
        }
    }
}

/// Merge `update` into the signed-in user when its id is `user_id`.
/// Anything else leaves the document unchanged.
pub fn update_user<S: StateStore + ?Sized>(
    store: &S,
    user_id: &str,
    update: UserUpdate,
) -> Result<AppState, StoreError> {
    mutate(store, |state| match state.current_user.as_mut() {
        Some(user) if user.user_id == user_id => update.apply(user),
        _ => {
            tracing::debug!(user_id, "update for a user who is not signed in ignored");
        }
    })
}

/// Simulated upgrade; no payment is taken.
pub fn upgrade_to_premium<S: StateStore + ?Sized>(
    store: &S,
    user_id: &str,
) -> Result<AppState, StoreError> {
    update_user(
        store,
        user_id,
        UserUpdate {
            is_premium: Some(true),
            ..UserUpdate::default()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Language, MemoryStore, UserRole};
    use chrono::TimeZone;

    fn user(id: &str) -> User {
        User {
            user_id: id.to_string(),
            name: "Hafiz".to_string(),
            email: "hafiz@example.com".to_string(),
            age: 16,
            role: UserRole::Student,
            joined_at: "2026-01-01T00:00:00.000Z".to_string(),
            is_premium: false,
        }
    }

    fn problem(id: &str) -> MathProblem {
        MathProblem {
            problem_id: id.to_string(),
            user_id: "u1".to_string(),
            image_url: None,
            question_text: Some("Solve 3x = 9".to_string()),
            solution: "x = 3".to_string(),
            topic: Some("Linear Equations".to_string()),
            language: Language::English,
            submission_time: "2026-10-14T10:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_problems_prepended() {
        let store = MemoryStore::new();
        add_problem(&store, problem("1")).unwrap();
        let state = add_problem(&store, problem("2")).unwrap();

        let ids: Vec<_> = state.problems.iter().map(|p| p.problem_id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
        assert_eq!(store.load().unwrap(), state);
    }

    #[test]
    fn test_feedback_prepended() {
        let store = MemoryStore::new();
        for id in ["a", "b"] {
            add_feedback(
                &store,
                Feedback {
                    feedback_id: id.to_string(),
                    user_id: "u1".to_string(),
                    user_name: "Hafiz".to_string(),
                    feedback_text: "ok".to_string(),
                    submission_time: String::new(),
                },
            )
            .unwrap();
        }
        assert_eq!(store.load().unwrap().feedbacks[0].feedback_id, "b");
    }

    #[test]
    fn test_submit_feedback() {
        let store = MemoryStore::new();
        let at = Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap();

        assert!(submit_feedback(&store, &user("u1"), "  ", at).unwrap().is_none());
        assert!(store.raw().is_none());

        let feedback = submit_feedback(&store, &user("u1"), "Terima kasih", at)
            .unwrap()
            .unwrap();
        assert_eq!(feedback.user_name, "Hafiz");
        assert_eq!(feedback.submission_time, "2026-10-14T12:00:00.000Z");
        assert_eq!(store.load().unwrap().feedbacks, vec![feedback]);
    }

    #[test]
    fn test_clear_auth_keeps_history() {
        let store = MemoryStore::new();
        set_current_user(&store, user("u1")).unwrap();
        add_problem(&store, problem("1")).unwrap();

        let state = clear_auth(&store).unwrap();
        assert!(state.current_user.is_none());
        assert_eq!(state.problems.len(), 1);
    }

    #[test]
    fn test_update_user_requires_matching_id() {
        let store = MemoryStore::new();
        set_current_user(&store, user("u1")).unwrap();

        let rename = UserUpdate {
            name: Some("Siti".to_string()),
            ..UserUpdate::default()
        };
        let state = update_user(&store, "someone-else", rename.clone()).unwrap();
        assert_eq!(state.current_user.as_ref().unwrap().name, "Hafiz");

        let state = update_user(&store, "u1", rename).unwrap();
        let updated = state.current_user.unwrap();
        assert_eq!(updated.name, "Siti");
        assert_eq!(updated.age, 16);
    }

    #[test]
    fn test_update_without_user_is_noop() {
        let store = MemoryStore::new();
        let state = update_user(&store, "u1", UserUpdate::default()).unwrap();
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn test_upgrade_to_premium() {
        let store = MemoryStore::new();
        set_current_user(&store, user("u1")).unwrap();

        upgrade_to_premium(&store, "u1").unwrap();
        assert!(store.load().unwrap().current_user.unwrap().is_premium);
    }

    #[test]
    fn test_store_usable_as_trait_object() {
        let store = MemoryStore::new();
        let dyn_store: &dyn StateStore = &store;
        add_problem(dyn_store, problem("1")).unwrap();
        assert_eq!(store.load().unwrap().problems.len(), 1);
    }
}
