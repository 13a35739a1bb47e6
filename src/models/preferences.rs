use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start_time: String,
    pub end_time: String,
}

/// User time preferences. Empty lists mean no preference; the avoid list
/// always wins over the preferred list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub avoid_time_slots: Vec<TimeRange>,
    #[serde(default)]
    pub preferred_time_slots: Vec<TimeRange>,
    #[serde(default)]
    pub hide_classes_in_monthly: bool,
}
