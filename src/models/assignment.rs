use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: high before medium before low.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum AssignmentKind {
    School,
    Personal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Assignment {
    pub id: String,
    pub title: String,
    pub due_date: String,
    /// Estimated workload in minutes.
    pub estimated_time: i64,
    pub priority: Priority,
    pub completed: bool,
    pub kind: AssignmentKind,
    /// Completion percentage 0-100; absent counts as 0.
    pub progress: Option<i64>,
    /// Opt-in flag: only opted-in assignments are considered for matching.
    pub added_to_ai: bool,
    pub memo: String,
    pub repeat_rule: Option<String>,
    pub reminder: Option<String>,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAssignmentRequest {
    pub title: String,
    pub due_date: String,
    pub estimated_time: i64,
    pub priority: Priority,
    pub kind: AssignmentKind,
    #[serde(default)]
    pub progress: Option<i64>,
    #[serde(default)]
    pub added_to_ai: bool,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub repeat_rule: Option<String>,
    #[serde(default)]
    pub reminder: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub due_date: Option<String>,
    pub estimated_time: Option<i64>,
    pub priority: Option<Priority>,
    pub kind: Option<AssignmentKind>,
    pub memo: Option<String>,
    pub repeat_rule: Option<String>,
    pub reminder: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdateRequest {
    pub completed: bool,
    pub progress: i64,
}

/// Bulk opt-in of assignments into the recommendation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddToPlannerRequest {
    pub ids: Vec<String>,
}
