//! Calendar arithmetic for day, week and month views.
//!
//! Dates are local calendar dates under a fixed UTC offset taken from
//! [`CalendarConfig`]. Instants stay in UTC everywhere else in the crate.

use super::TimeWindow;
use crate::config::CalendarConfig;
use chrono::{
    DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, NaiveTime, TimeDelta, Utc, Weekday,
};

const DAYS_PER_WEEK: u64 = 7;

/// Converts a local date and time of day into a UTC instant.
#[must_use]
pub fn at_local_time(date: NaiveDate, time: NaiveTime, offset: FixedOffset) -> DateTime<Utc> {
    let local = date.and_time(time);
    (local - TimeDelta::seconds(i64::from(offset.local_minus_utc()))).and_utc()
}

/// Returns the local calendar date of `instant`.
#[must_use]
pub fn local_date(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}

/// Returns the UTC instant of local midnight on the day containing `instant`.
#[must_use]
pub fn local_day_start(instant: DateTime<Utc>, offset: FixedOffset) -> DateTime<Utc> {
    at_local_time(local_date(instant, offset), NaiveTime::default(), offset)
}

/// Returns the window covering the local day `date`.
#[must_use]
pub fn day_window(date: NaiveDate, offset: FixedOffset) -> TimeWindow {
    let next = date.succ_opt().unwrap_or(NaiveDate::MAX);
    dates_window(date, next, offset)
}

/// Returns `true` when both instants fall on the same local day.
#[must_use]
pub fn is_same_day(first: DateTime<Utc>, second: DateTime<Utc>, offset: FixedOffset) -> bool {
    local_date(first, offset) == local_date(second, offset)
}

/// Returns `true` when a task window touches the local day `date`.
///
/// A task spanning several days matches each of them.
#[must_use]
pub fn window_matches_date(window: &TimeWindow, date: NaiveDate, offset: FixedOffset) -> bool {
    window.overlaps(&day_window(date, offset))
}

/// Returns the first day of the week containing `date`.
#[must_use]
pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let back = u64::from(date.weekday().days_since(week_start));
    date.checked_sub_days(Days::new(back))
        .unwrap_or(NaiveDate::MIN)
}

/// Returns the last day of the week containing `date`.
#[must_use]
pub fn end_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    start_of_week(date, week_start)
        .checked_add_days(Days::new(DAYS_PER_WEEK - 1))
        .unwrap_or(NaiveDate::MAX)
}

/// Returns the seven days of the week containing `date`, in order.
#[must_use]
pub fn week_days(date: NaiveDate, week_start: Weekday) -> Vec<NaiveDate> {
    start_of_week(date, week_start)
        .iter_days()
        .take(7)
        .collect()
}

/// Returns the first day of the month containing `date`.
#[must_use]
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(date.day0())))
        .unwrap_or(NaiveDate::MIN)
}

/// Returns the last day of the month containing `date`.
#[must_use]
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    start_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Returns the full weeks covering the month of `date`, as shown by a month
/// grid. The result always holds a multiple of seven days.
#[must_use]
pub fn month_grid(date: NaiveDate, week_start: Weekday) -> Vec<NaiveDate> {
    let first = start_of_week(start_of_month(date), week_start);
    let last = end_of_week(end_of_month(date), week_start);
    first.iter_days().take_while(|day| *day <= last).collect()
}

/// Returns the window covering the week containing `date`.
#[must_use]
pub fn week_window(date: NaiveDate, calendar: &CalendarConfig) -> TimeWindow {
    let first = start_of_week(date, calendar.week_start);
    let after = end_of_week(date, calendar.week_start)
        .succ_opt()
        .unwrap_or(NaiveDate::MAX);
    dates_window(first, after, calendar.utc_offset)
}

/// Returns the window covering the month containing `date`.
#[must_use]
pub fn month_window(date: NaiveDate, calendar: &CalendarConfig) -> TimeWindow {
    let after = end_of_month(date).succ_opt().unwrap_or(NaiveDate::MAX);
    dates_window(start_of_month(date), after, calendar.utc_offset)
}

fn dates_window(first: NaiveDate, after: NaiveDate, offset: FixedOffset) -> TimeWindow {
    TimeWindow::from_ordered(
        at_local_time(first, NaiveTime::default(), offset),
        at_local_time(after, NaiveTime::default(), offset),
    )
}
