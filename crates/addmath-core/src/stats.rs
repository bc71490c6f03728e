//! Dashboard and admin summaries over the stored problems.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::store::{AppState, MathProblem};

/// Days charted on the dashboard, today included.
pub const CHART_DAYS: u64 = 7;
/// Recent problems listed on the dashboard.
pub const DASHBOARD_RECENT: usize = 5;
/// Recent problems listed in the admin panel.
pub const ADMIN_RECENT: usize = 10;

/// Label shown for problems without a recognised topic.
pub const GENERAL_TOPIC: &str = "General Math";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    /// Short English weekday, e.g. `Mon`.
    pub day: String,
    pub solved: usize,
}

/// Problems per day over the last week, oldest first, ending on `today`.
///
/// Days are matched on the date prefix of `submissionTime`, which is UTC.
pub fn daily_solved(problems: &[MathProblem], today: NaiveDate) -> Vec<DailyCount> {
    (0..CHART_DAYS)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|date| {
            let prefix = date.format("%Y-%m-%d").to_string();
            DailyCount {
                day: date.format("%a").to_string(),
                solved: problems
                    .iter()
                    .filter(|p| p.submission_time.starts_with(&prefix))
                    .count(),
            }
        })
        .collect()
}

/// Number of distinct non-empty topics.
pub fn distinct_topics(problems: &[MathProblem]) -> usize {
    problems
        .iter()
        .filter_map(|p| p.topic.as_deref())
        .filter(|t| !t.is_empty())
        .collect::<HashSet<_>>()
        .len()
}

pub fn topic_label(problem: &MathProblem) -> &str {
    problem
        .topic
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(GENERAL_TOPIC)
}

/// Student dashboard figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_solved: usize,
    pub topics: usize,
    pub chart: Vec<DailyCount>,
    pub recent: Vec<MathProblem>,
}

impl DashboardSummary {
    pub fn from_problems(problems: &[MathProblem], today: NaiveDate) -> Self {
        Self {
            total_solved: problems.len(),
            topics: distinct_topics(problems),
            chart: daily_solved(problems, today),
            recent: problems.iter().take(DASHBOARD_RECENT).cloned().collect(),
        }
    }
}

/// Admin panel figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummary {
    pub total_submissions: usize,
    /// Only one session can exist per document.
    pub active_sessions: usize,
    pub feedback_count: usize,
    pub recent: Vec<MathProblem>,
}

impl AdminSummary {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            total_submissions: state.problems.len(),
            active_sessions: usize::from(state.current_user.is_some()),
            feedback_count: state.feedbacks.len(),
            recent: state.problems.iter().take(ADMIN_RECENT).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Feedback, Language, User, UserRole};

    fn problem(id: usize, time: &str, topic: Option<&str>) -> MathProblem {
        MathProblem {
            problem_id: id.to_string(),
            user_id: "u1".to_string(),
            image_url: None,
            question_text: None,
            solution: String::new(),
            topic: topic.map(str::to_string),
            language: Language::English,
            submission_time: time.to_string(),
        }
    }

    fn today() -> NaiveDate {
        // A Wednesday
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    #[test]
    fn test_daily_solved_labels_oldest_first() {
        let chart = daily_solved(&[], today());
        let days: Vec<_> = chart.iter().map(|c| c.day.as_str()).collect();
        assert_eq!(days, ["Thu", "Fri", "Sat", "Sun", "Mon", "Tue", "Wed"]);
        assert!(chart.iter().all(|c| c.solved == 0));
    }

    #[test]
    fn test_daily_solved_counts_by_date_prefix() {
        let problems = vec![
            problem(1, "2026-10-14T09:00:00.000Z", None),
            problem(2, "2026-10-14T23:59:59.999Z", None),
            problem(3, "2026-10-08T00:00:00.000Z", None),
            // Outside the window
            problem(4, "2026-10-07T12:00:00.000Z", None),
            problem(5, "2026-10-15T00:00:00.000Z", None),
        ];
        let chart = daily_solved(&problems, today());

        assert_eq!(chart.len(), 7);
        assert_eq!(chart[0].solved, 1);
        assert_eq!(chart[6].solved, 2);
        assert_eq!(chart.iter().map(|c| c.solved).sum::<usize>(), 3);
    }

    #[test]
    fn test_daily_solved_across_month_boundary() {
        let problems = vec![problem(1, "2026-09-28T10:00:00.000Z", None)];
        let chart = daily_solved(&problems, NaiveDate::from_ymd_opt(2026, 10, 2).unwrap());
        assert_eq!(chart[2].solved, 1);
    }

    #[test]
    fn test_distinct_topics() {
        let problems = vec![
            problem(1, "", Some("Indices")),
            problem(2, "", Some("Indices")),
            problem(3, "", Some("Vectors")),
            problem(4, "", Some("")),
            problem(5, "", None),
        ];
        assert_eq!(distinct_topics(&problems), 2);
        assert_eq!(topic_label(&problems[3]), GENERAL_TOPIC);
        assert_eq!(topic_label(&problems[0]), "Indices");
    }

    #[test]
    fn test_dashboard_summary() {
        let problems: Vec<_> = (0..8)
            .map(|i| problem(i, "2026-10-14T01:00:00.000Z", Some("Indices")))
            .collect();
        let summary = DashboardSummary::from_problems(&problems, today());

        assert_eq!(summary.total_solved, 8);
        assert_eq!(summary.topics, 1);
        assert_eq!(summary.recent.len(), DASHBOARD_RECENT);
        assert_eq!(summary.chart[6].solved, 8);
    }

    #[test]
    fn test_admin_summary() {
        let mut state = AppState::default();
        state.problems = (0..12).map(|i| problem(i, "", None)).collect();
        state.feedbacks.push(Feedback {
            feedback_id: "f".into(),
            user_id: "u1".into(),
            user_name: "Aina".into(),
            feedback_text: "Good".into(),
            submission_time: String::new(),
        });

        let summary = AdminSummary::from_state(&state);
        assert_eq!(summary.total_submissions, 12);
        assert_eq!(summary.active_sessions, 0);
        assert_eq!(summary.feedback_count, 1);
        assert_eq!(summary.recent.len(), ADMIN_RECENT);
        assert_eq!(summary.recent[0].problem_id, "0");

        state.current_user = Some(User {
            user_id: "u1".into(),
            name: "Aina".into(),
            email: "a@b.my".into(),
            age: 17,
            role: UserRole::Admin,
            joined_at: String::new(),
            is_premium: false,
        });
        assert_eq!(AdminSummary::from_state(&state).active_sessions, 1);
    }
}
