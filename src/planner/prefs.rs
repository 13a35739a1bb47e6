//! Preference filtering of free slots.

use crate::models::{Preferences, TimeSlot};
use crate::planner::clock;

/// Whether a free slot may be offered to an assignment under the user's
/// time preferences. The avoid list is checked first and short-circuits;
/// a populated preferred list then requires at least one overlap. With no
/// preferences at all every slot is allowed.
pub fn slot_allowed(slot: &TimeSlot, preferences: Option<&Preferences>) -> bool {
    let Some(prefs) = preferences else {
        return true;
    };

    if !prefs.avoid_time_slots.is_empty() {
        let avoided = prefs.avoid_time_slots.iter().any(|avoid| {
            clock::overlaps(
                &slot.start_time,
                &slot.end_time,
                &avoid.start_time,
                &avoid.end_time,
            )
        });
        if avoided {
            return false;
        }
    }

    if !prefs.preferred_time_slots.is_empty() {
        return prefs.preferred_time_slots.iter().any(|preferred| {
            clock::overlaps(
                &slot.start_time,
                &slot.end_time,
                &preferred.start_time,
                &preferred.end_time,
            )
        });
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeRange;

    fn range(start: &str, end: &str) -> TimeRange {
        TimeRange {
            start_time: start.to_string(),
            end_time: end.to_string(),
        }
    }

    fn slot() -> TimeSlot {
        TimeSlot::open("Mon", "09:00", "10:00")
    }

    #[test]
    fn no_preferences_allows_everything() {
        assert!(slot_allowed(&slot(), None));
        assert!(slot_allowed(&slot(), Some(&Preferences::default())));
    }

    #[test]
    fn avoid_list_rejects_overlapping_slots() {
        let prefs = Preferences {
            avoid_time_slots: vec![range("09:30", "11:00")],
            ..Default::default()
        };
        assert!(!slot_allowed(&slot(), Some(&prefs)));
    }

    #[test]
    fn avoid_list_is_half_open() {
        let prefs = Preferences {
            avoid_time_slots: vec![range("10:00", "11:00")],
            ..Default::default()
        };
        // Touching the avoided range is fine.
        assert!(slot_allowed(&slot(), Some(&prefs)));
    }

    #[test]
    fn preferred_list_requires_an_overlap() {
        let prefs = Preferences {
            preferred_time_slots: vec![range("14:00", "16:00")],
            ..Default::default()
        };
        assert!(!slot_allowed(&slot(), Some(&prefs)));
        assert!(slot_allowed(
            &TimeSlot::open("Mon", "14:00", "15:00"),
            Some(&prefs)
        ));
    }

    #[test]
    fn avoid_wins_over_preferred() {
        let prefs = Preferences {
            avoid_time_slots: vec![range("09:00", "10:00")],
            preferred_time_slots: vec![range("09:00", "10:00")],
            ..Default::default()
        };
        assert!(!slot_allowed(&slot(), Some(&prefs)));
    }
}
