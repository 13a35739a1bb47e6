//! Free-slot discovery over the fixed grid of campus teaching hours.

use serde::{Deserialize, Serialize};

use crate::models::TimeSlot;
use crate::planner::clock;

/// One teaching period of the campus day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeachingPeriod {
    pub start: String,
    pub end: String,
}

impl TeachingPeriod {
    fn new(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

/// The institution's weekly grid: which weekdays classes run on and which
/// hour periods make up a teaching day. Kept as data so a different campus
/// calendar never touches the matching code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourCatalog {
    pub weekdays: Vec<String>,
    pub periods: Vec<TeachingPeriod>,
}

impl Default for HourCatalog {
    fn default() -> Self {
        Self {
            weekdays: ["Mon", "Tue", "Wed", "Thu", "Fri"]
                .into_iter()
                .map(String::from)
                .collect(),
            // 12:00-13:00 is lunch and is deliberately not a teaching
            // period, so it can never be proposed as free.
            periods: vec![
                TeachingPeriod::new("09:00", "10:00"),
                TeachingPeriod::new("10:00", "11:00"),
                TeachingPeriod::new("11:00", "12:00"),
                TeachingPeriod::new("13:00", "14:00"),
                TeachingPeriod::new("14:00", "15:00"),
                TeachingPeriod::new("15:00", "16:00"),
                TeachingPeriod::new("16:00", "17:00"),
            ],
        }
    }
}

/// Scan the catalog in weekday-then-period order and keep every period with
/// no overlapping class entry on that weekday. The output order is the
/// matcher's tie-break priority. Classes outside the catalog's hours are
/// invisible here.
pub fn find_free_slots(schedule: &[TimeSlot], catalog: &HourCatalog) -> Vec<TimeSlot> {
    let mut free_slots = Vec::new();

    for day in &catalog.weekdays {
        let day_schedule: Vec<&TimeSlot> = schedule.iter().filter(|s| &s.day == day).collect();

        for period in &catalog.periods {
            let has_class = day_schedule.iter().any(|slot| {
                clock::overlaps(&period.start, &period.end, &slot.start_time, &slot.end_time)
            });

            if !has_class {
                free_slots.push(TimeSlot::open(day, &period.start, &period.end));
            }
        }
    }

    free_slots
}
