use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Timetable {
    pub id: String,
    pub name: String,
    pub is_current: bool,
    pub updated_at: String,
}

/// A single entry of a weekly grid: a class occupancy when loaded from a
/// timetable, or an open period when produced by the free-slot finder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TimeSlot {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub is_blocked: bool,
}

impl TimeSlot {
    /// An open period with no subject attached.
    pub fn open(day: &str, start_time: &str, end_time: &str) -> Self {
        Self {
            day: day.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            subject: None,
            is_blocked: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTimetableRequest {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameTimetableRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceScheduleRequest {
    pub schedule: Vec<TimeSlot>,
}
