//! Assignment triage: which assignments are worth matching, how much time
//! they still need, and in what order they should be offered a slot.

use crate::models::{Assignment, Candidate};

/// Minutes still needed to finish an assignment, scaled by its progress
/// percentage and rounded up. Full progress yields zero.
pub fn remaining_minutes(assignment: &Assignment) -> i64 {
    let progress = assignment.progress.unwrap_or(0);
    // Ceiling division; progress past 100 goes negative and is dropped by
    // the caller's positivity filter.
    (assignment.estimated_time * (100 - progress) + 99).div_euclid(100)
}

/// Filter to opted-in, incomplete assignments with time left, then order by
/// priority rank and ascending due date (ISO dates compare as text).
pub fn triage_assignments(assignments: &[Assignment]) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = assignments
        .iter()
        .filter(|a| a.added_to_ai && !a.completed)
        .map(|a| Candidate {
            remaining_time: remaining_minutes(a),
            assignment: a.clone(),
        })
        .filter(|c| c.remaining_time > 0)
        .collect();

    candidates.sort_by(|a, b| {
        a.assignment
            .priority
            .rank()
            .cmp(&b.assignment.priority.rank())
            .then_with(|| a.assignment.due_date.cmp(&b.assignment.due_date))
    });

    candidates
}
