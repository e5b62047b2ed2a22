//! Date constraints for task and subtask forms.
//!
//! A task lives inside its project window and a subtask inside its parent
//! task window. Siblings (tasks sharing project and parent) are reported as
//! blocked ranges; overlapping them only produces an [`OverlapWarning`].
//!
//! The start/end bounds intersect the parent window with the envelope of the
//! siblings rather than subtracting occupied intervals, so a picker can show
//! a date as allowed by the bounds while it sits inside a blocked range.

use super::{ScheduleError, TimeWindow};
use crate::task::domain::TaskId;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of form the constraints are computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintContext {
    /// Project dates; no parent and no siblings.
    Project,
    /// Top-level task inside a project.
    Task,
    /// Subtask inside a task.
    Subtask,
}

/// Window occupied by a sibling task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    /// Task occupying the window.
    pub task_id: TaskId,
    /// Occupied window.
    pub window: TimeWindow,
}

impl BusyInterval {
    /// Creates a busy interval.
    #[must_use]
    pub const fn new(task_id: TaskId, window: TimeWindow) -> Self {
        Self { task_id, window }
    }
}

/// Bounds offered to a date picker.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskConstraints {
    /// Earliest allowed start, if constrained.
    pub start_constraint: Option<DateTime<Utc>>,
    /// Latest allowed end, if constrained.
    pub end_constraint: Option<DateTime<Utc>>,
    /// Sibling windows rendered as disallowed zones.
    pub blocked_ranges: Vec<BusyInterval>,
}

/// Advisory notice that a window overlaps sibling tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapWarning {
    /// Siblings whose windows intersect the requested one.
    pub conflicting: Vec<TaskId>,
}

impl fmt::Display for OverlapWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.conflicting.len() {
            1 => f.write_str("the selected dates overlap another task"),
            count => write!(f, "the selected dates overlap {count} other tasks"),
        }
    }
}

fn others(
    existing: &[BusyInterval],
    exclude_id: Option<TaskId>,
) -> impl Iterator<Item = &BusyInterval> {
    existing
        .iter()
        .filter(move |interval| Some(interval.task_id) != exclude_id)
}

/// Computes picker bounds for a form.
///
/// For tasks and subtasks the start bound is the later of the parent start
/// and the earliest sibling start; the end bound is the earlier of the parent
/// end and the latest sibling end. Either side falls back to the parent bound
/// when there are no siblings.
#[must_use]
pub fn calculate_constraints(
    context: ConstraintContext,
    parent: Option<&TimeWindow>,
    siblings: &[BusyInterval],
    exclude_id: Option<TaskId>,
) -> TaskConstraints {
    if context == ConstraintContext::Project {
        return TaskConstraints::default();
    }

    let blocked_ranges: Vec<BusyInterval> = others(siblings, exclude_id).copied().collect();
    let earliest_start = blocked_ranges.iter().map(|busy| busy.window.start()).min();
    let latest_end = blocked_ranges.iter().map(|busy| busy.window.end()).max();

    let start_constraint = tighter(parent.map(TimeWindow::start), earliest_start, Ord::max);
    let end_constraint = tighter(parent.map(TimeWindow::end), latest_end, Ord::min);

    TaskConstraints {
        start_constraint,
        end_constraint,
        blocked_ranges,
    }
}

fn tighter(
    parent: Option<DateTime<Utc>>,
    siblings: Option<DateTime<Utc>>,
    pick: fn(DateTime<Utc>, DateTime<Utc>) -> DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match (parent, siblings) {
        (Some(bound), Some(envelope)) => Some(pick(bound, envelope)),
        (bound, envelope) => bound.or(envelope),
    }
}

/// Returns `true` when `window` overlaps any interval other than
/// `exclude_id`.
#[must_use]
pub fn check_task_overlap(
    window: &TimeWindow,
    existing: &[BusyInterval],
    exclude_id: Option<TaskId>,
) -> bool {
    others(existing, exclude_id).any(|busy| window.overlaps(&busy.window))
}

/// Returns the free windows of at least `min_duration` inside `parent`.
///
/// Busy intervals are clipped to the parent window and walked in start
/// order; overlapping busy intervals merge naturally because the cursor only
/// moves forward.
#[must_use]
pub fn find_available_time_slots(
    parent: &TimeWindow,
    existing: &[BusyInterval],
    min_duration: TimeDelta,
    exclude_id: Option<TaskId>,
) -> Vec<TimeWindow> {
    let mut busy: Vec<TimeWindow> = others(existing, exclude_id)
        .filter_map(|interval| interval.window.intersection(parent))
        .collect();
    busy.sort_by_key(TimeWindow::start);

    let mut slots = Vec::new();
    let mut cursor = parent.start();
    for occupied in &busy {
        push_gap(&mut slots, cursor, occupied.start(), min_duration);
        cursor = cursor.max(occupied.end());
    }
    push_gap(&mut slots, cursor, parent.end(), min_duration);
    slots
}

fn push_gap(
    slots: &mut Vec<TimeWindow>,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    min_duration: TimeDelta,
) {
    if to - from < min_duration {
        return;
    }
    if let Ok(slot) = TimeWindow::new(from, to) {
        slots.push(slot);
    }
}

/// Checks a requested window against its parent and siblings.
///
/// Leaving the parent bounds is an error; overlapping siblings yields a
/// warning and never blocks the caller.
///
/// # Errors
///
/// Returns [`ScheduleError::OutsideParent`] when `window` is not contained in
/// `parent`.
pub fn validate_placement(
    window: &TimeWindow,
    parent: Option<&TimeWindow>,
    siblings: &[BusyInterval],
    exclude_id: Option<TaskId>,
) -> Result<Option<OverlapWarning>, ScheduleError> {
    if let Some(bounds) = parent {
        if !bounds.contains_window(window) {
            return Err(ScheduleError::OutsideParent {
                window: *window,
                parent: *bounds,
            });
        }
    }

    let conflicting: Vec<TaskId> = others(siblings, exclude_id)
        .filter(|busy| window.overlaps(&busy.window))
        .map(|busy| busy.task_id)
        .collect();
    if conflicting.is_empty() {
        return Ok(None);
    }
    Ok(Some(OverlapWarning { conflicting }))
}
