use serde::{Deserialize, Serialize};

use crate::models::{Assignment, TimeSlot};

/// An assignment that survived triage, annotated with the minutes still
/// needed to finish it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub remaining_time: i64,
}

/// One proposed pairing of a free period and a pending assignment.
/// Recommendations are derived values: recomputed whole on every pass,
/// never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub time_slot: TimeSlot,
    pub assignment: Candidate,
    pub reason: String,
}
