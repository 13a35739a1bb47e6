use campus_planner::models::{Assignment, AssignmentKind, Priority, TimeSlot};
use campus_planner::planner::{
    compute_free_slots, generate_recommendations, triage_assignments,
};

fn class(day: &str, start: &str, end: &str, subject: &str) -> TimeSlot {
    TimeSlot {
        day: day.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        subject: Some(subject.to_string()),
        is_blocked: false,
    }
}

fn assignment(id: &str, estimated: i64, priority: Priority, due: &str) -> Assignment {
    Assignment {
        id: id.to_string(),
        title: format!("Assignment {id}"),
        due_date: due.to_string(),
        estimated_time: estimated,
        priority,
        completed: false,
        kind: AssignmentKind::School,
        progress: None,
        added_to_ai: true,
        memo: String::new(),
        repeat_rule: None,
        reminder: None,
        updated_at: "2026-01-01T00:00:00+00:00".to_string(),
    }
}

/// A realistic first-semester week.
fn semester_schedule() -> Vec<TimeSlot> {
    vec![
        class("Mon", "09:00", "10:00", "Data Structures"),
        class("Mon", "11:00", "12:00", "Algorithms"),
        class("Tue", "09:00", "10:00", "Operating Systems"),
        class("Tue", "14:00", "15:00", "Databases"),
        class("Wed", "10:00", "11:00", "Networks"),
        class("Thu", "09:00", "10:00", "Software Engineering"),
        class("Fri", "13:00", "14:00", "Artificial Intelligence"),
    ]
}

#[test]
fn free_slots_of_a_semester_week() {
    let free = compute_free_slots(&semester_schedule());

    // 35 catalog periods minus the 7 occupied ones.
    assert_eq!(free.len(), 28);

    // Weekday-then-hour ordering, starting with Monday's first open period.
    assert_eq!(free[0], TimeSlot::open("Mon", "10:00", "11:00"));
    assert!(free.iter().all(|slot| slot.subject.is_none()));
    assert!(
        !free
            .iter()
            .any(|slot| slot.day == "Mon" && slot.start_time == "09:00")
    );
}

#[test]
fn triage_annotates_and_orders_pending_work() {
    let mut essay = assignment("essay", 120, Priority::Medium, "2026-03-10");
    essay.progress = Some(75);

    let candidates = triage_assignments(&[
        assignment("lab", 60, Priority::Medium, "2026-03-05"),
        essay,
        assignment("quiz", 30, Priority::High, "2026-03-20"),
    ]);

    let order: Vec<(&str, i64)> = candidates
        .iter()
        .map(|c| (c.assignment.id.as_str(), c.remaining_time))
        .collect();
    assert_eq!(order, [("quiz", 30), ("lab", 60), ("essay", 30)]);
}

#[test]
fn recommendations_fill_the_week_in_order() {
    let assignments = vec![
        assignment("ds-homework", 60, Priority::High, "2026-03-05"),
        assignment("algo-report", 50, Priority::Medium, "2026-03-07"),
    ];

    let recs = generate_recommendations(&semester_schedule(), &assignments, None);

    assert_eq!(recs.len(), 2);
    // High priority takes Monday's first open period, medium the next one.
    assert_eq!(recs[0].time_slot, TimeSlot::open("Mon", "10:00", "11:00"));
    assert_eq!(recs[0].assignment.assignment.id, "ds-homework");
    assert_eq!(recs[1].time_slot, TimeSlot::open("Mon", "13:00", "14:00"));
    assert_eq!(recs[1].assignment.assignment.id, "algo-report");
}

#[test]
fn a_full_week_produces_nothing() {
    let schedule: Vec<TimeSlot> = ["Mon", "Tue", "Wed", "Thu", "Fri"]
        .iter()
        .map(|day| class(day, "09:00", "17:00", "Block week"))
        .collect();
    let assignments = vec![assignment("a", 30, Priority::High, "2026-03-01")];

    assert!(compute_free_slots(&schedule).is_empty());
    assert!(generate_recommendations(&schedule, &assignments, None).is_empty());
}

#[test]
fn unmatched_slots_are_simply_omitted() {
    // One long assignment and many one-hour slots: a single match, and the
    // remaining slots yield nothing rather than erroring.
    let mut half_done = assignment("thesis", 120, Priority::High, "2026-06-01");
    half_done.progress = Some(50);
    let assignments = vec![
        half_done,
        assignment("too-big", 180, Priority::Low, "2026-06-01"),
    ];

    let recs = generate_recommendations(&semester_schedule(), &assignments, None);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].assignment.assignment.id, "thesis");
    assert_eq!(recs[0].assignment.remaining_time, 60);
}
