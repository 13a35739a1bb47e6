//! Recommendation engine: pairs pending assignments with free periods of
//! the weekly timetable.
//!
//! Pure and synchronous throughout. Every function computes fresh derived
//! values from immutable snapshots and never touches storage, so a pass can
//! be re-run at any time with identical results.

pub mod clock;
pub mod free_slots;
pub mod prefs;
pub mod triage;

use std::collections::HashSet;

use tracing::debug;

pub use free_slots::{HourCatalog, TeachingPeriod, find_free_slots};
pub use triage::triage_assignments;

use crate::models::{Assignment, Candidate, Preferences, Recommendation, TimeSlot};

/// Compute the free slots of the current schedule using the default campus
/// hour catalog.
pub fn compute_free_slots(schedule: &[TimeSlot]) -> Vec<TimeSlot> {
    free_slots::find_free_slots(schedule, &HourCatalog::default())
}

/// Match pending assignments into free periods with the default catalog.
pub fn generate_recommendations(
    schedule: &[TimeSlot],
    assignments: &[Assignment],
    preferences: Option<&Preferences>,
) -> Vec<Recommendation> {
    generate_with_catalog(schedule, assignments, preferences, &HourCatalog::default())
}

/// First-fit greedy matching of triaged assignments into free slots.
///
/// Slots are visited in weekday-then-hour order; each slot takes the first
/// unused candidate whose remaining time fits its duration. Greedy by
/// intent: a slot may stay empty even though a later candidate would have
/// fit it, which keeps the outcome predictable for the student.
pub fn generate_with_catalog(
    schedule: &[TimeSlot],
    assignments: &[Assignment],
    preferences: Option<&Preferences>,
    catalog: &HourCatalog,
) -> Vec<Recommendation> {
    if schedule.is_empty() || assignments.is_empty() {
        return Vec::new();
    }

    let free_slots = free_slots::find_free_slots(schedule, catalog);
    let candidates = triage::triage_assignments(assignments);

    let mut recommendations = Vec::new();
    let mut used: HashSet<String> = HashSet::new();

    for slot in free_slots {
        if !prefs::slot_allowed(&slot, preferences) {
            debug!(
                day = %slot.day,
                start = %slot.start_time,
                end = %slot.end_time,
                "free slot filtered out by preferences"
            );
            continue;
        }

        let slot_minutes = clock::duration_hours(&slot.start_time, &slot.end_time) * 60.0;

        let matched = candidates.iter().find(|candidate| {
            !used.contains(&candidate.assignment.id)
                && candidate.remaining_time as f64 <= slot_minutes
        });

        if let Some(candidate) = matched {
            used.insert(candidate.assignment.id.clone());
            let reason = describe_match(candidate, &slot);
            debug!(
                assignment = %candidate.assignment.title,
                day = %slot.day,
                start = %slot.start_time,
                "matched assignment to free slot"
            );
            recommendations.push(Recommendation {
                time_slot: slot,
                assignment: candidate.clone(),
                reason,
            });
        }
    }

    recommendations
}

fn describe_match(candidate: &Candidate, slot: &TimeSlot) -> String {
    let progress = candidate.assignment.progress.unwrap_or(0);
    if progress > 0 {
        format!(
            "{progress}% done, {} min left - use the {} {}-{} free period",
            candidate.remaining_time, slot.day, slot.start_time, slot.end_time
        )
    } else {
        format!(
            "Estimated {} min - use the {} {}-{} free period",
            candidate.assignment.estimated_time, slot.day, slot.start_time, slot.end_time
        )
    }
}
