pub mod assignment;
pub mod preferences;
pub mod recommendation;
pub mod timetable;

pub use assignment::{
    AddToPlannerRequest, Assignment, AssignmentKind, NewAssignmentRequest, Priority,
    ProgressUpdateRequest, UpdateAssignmentRequest,
};
pub use preferences::{Preferences, TimeRange};
pub use recommendation::{Candidate, Recommendation};
pub use timetable::{
    NewTimetableRequest, RenameTimetableRequest, ReplaceScheduleRequest, TimeSlot, Timetable,
};
