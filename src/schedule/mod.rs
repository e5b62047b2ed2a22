//! Pure scheduling logic: time windows, calendar arithmetic and the task
//! constraint calculator.
//!
//! Nothing here performs I/O. Services load parents and siblings from the
//! repositories and hand them to these functions.

pub mod calendar;
pub mod constraints;
mod error;
mod window;

pub use constraints::{
    BusyInterval, ConstraintContext, OverlapWarning, TaskConstraints, calculate_constraints,
    check_task_overlap, find_available_time_slots, validate_placement,
};
pub use error::ScheduleError;
pub use window::TimeWindow;
