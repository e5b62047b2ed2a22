//! Runtime configuration for the tracker core.
//!
//! Every value has a default so library users can start from
//! [`TrackerConfig::default`]. Processes read overrides from `FASTCHECK_*`
//! environment variables through [`TrackerConfig::from_env`].

use chrono::{FixedOffset, NaiveTime, Offset, TimeDelta, Utc, Weekday};
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the default daily review time (`HH:MM`).
pub const REVIEW_TIME_ENV: &str = "FASTCHECK_REVIEW_TIME";
/// Environment variable holding the local UTC offset in minutes.
pub const UTC_OFFSET_ENV: &str = "FASTCHECK_UTC_OFFSET_MINUTES";
/// Environment variable holding the first day of the week (`mon`..`sun`).
pub const WEEK_START_ENV: &str = "FASTCHECK_WEEK_START";
/// Environment variable holding the status refresh period in seconds.
pub const REFRESH_INTERVAL_ENV: &str = "FASTCHECK_REFRESH_INTERVAL_SECS";
/// Environment variable holding the urgent escalation threshold in minutes.
pub const URGENT_ESCALATION_ENV: &str = "FASTCHECK_URGENT_ESCALATION_MINUTES";
/// Environment variable holding the fallback escalation threshold in hours.
pub const FALLBACK_ESCALATION_ENV: &str = "FASTCHECK_FALLBACK_ESCALATION_HOURS";
/// Environment variable holding the minimum suggested slot length in minutes.
pub const MIN_SLOT_ENV: &str = "FASTCHECK_MIN_SLOT_MINUTES";

const SECONDS_PER_MINUTE: i32 = 60;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Local calendar settings shared by day/week/month computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarConfig {
    /// Offset used to decide where local days begin and end.
    pub utc_offset: FixedOffset,
    /// First day of the week for week views.
    pub week_start: Weekday,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            utc_offset: Utc.fix(),
            week_start: Weekday::Mon,
        }
    }
}

/// Review timing and escalation thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewPolicy {
    /// Review time used when a user has no settings row.
    pub default_review_time: NaiveTime,
    /// How long an urgent task may be overdue before it is highlighted.
    pub urgent_escalation: TimeDelta,
    /// Escalation threshold used when review settings cannot be read.
    pub fallback_escalation: TimeDelta,
}

impl Default for ReviewPolicy {
    fn default() -> Self {
        Self {
            default_review_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            urgent_escalation: TimeDelta::hours(1),
            fallback_escalation: TimeDelta::hours(24),
        }
    }
}

/// Top-level configuration.
///
/// # Examples
///
/// ```
/// use fastcheck::config::TrackerConfig;
///
/// let config = TrackerConfig::default();
/// assert_eq!(config.refresh_interval.as_secs(), 60);
/// assert_eq!(config.min_slot.num_minutes(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Calendar settings.
    pub calendar: CalendarConfig,
    /// Review settings.
    pub review: ReviewPolicy,
    /// Period of the background status refresh.
    pub refresh_interval: Duration,
    /// Shortest free slot worth suggesting.
    pub min_slot: TimeDelta,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            calendar: CalendarConfig::default(),
            review: ReviewPolicy::default(),
            refresh_interval: Duration::from_secs(60),
            min_slot: TimeDelta::minutes(30),
        }
    }
}

impl TrackerConfig {
    /// Builds a configuration from defaults overridden by the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a set variable cannot be
    /// parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from defaults overridden by `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a provided value cannot be
    /// parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(REVIEW_TIME_ENV) {
            config.review.default_review_time = parse_review_time(REVIEW_TIME_ENV, &raw)?;
        }
        if let Some(raw) = lookup(UTC_OFFSET_ENV) {
            config.calendar.utc_offset = parse_offset(&raw)?;
        }
        if let Some(raw) = lookup(WEEK_START_ENV) {
            config.calendar.week_start = parse_week_start(&raw)?;
        }
        if let Some(raw) = lookup(REFRESH_INTERVAL_ENV) {
            let secs = parse_positive(REFRESH_INTERVAL_ENV, &raw)?;
            config.refresh_interval = Duration::from_secs(secs.unsigned_abs());
        }
        if let Some(raw) = lookup(URGENT_ESCALATION_ENV) {
            config.review.urgent_escalation =
                parse_delta(URGENT_ESCALATION_ENV, &raw, TimeDelta::try_minutes)?;
        }
        if let Some(raw) = lookup(FALLBACK_ESCALATION_ENV) {
            config.review.fallback_escalation =
                parse_delta(FALLBACK_ESCALATION_ENV, &raw, TimeDelta::try_hours)?;
        }
        if let Some(raw) = lookup(MIN_SLOT_ENV) {
            config.min_slot = parse_delta(MIN_SLOT_ENV, &raw, TimeDelta::try_minutes)?;
        }

        Ok(config)
    }
}

fn invalid(key: &'static str, raw: &str, reason: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: raw.to_owned(),
        reason,
    }
}

fn parse_review_time(key: &'static str, raw: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").map_err(|_| invalid(key, raw, "expected HH:MM"))
}

fn parse_offset(raw: &str) -> Result<FixedOffset, ConfigError> {
    let minutes: i32 = raw
        .trim()
        .parse()
        .map_err(|_| invalid(UTC_OFFSET_ENV, raw, "expected whole minutes"))?;
    minutes
        .checked_mul(SECONDS_PER_MINUTE)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| invalid(UTC_OFFSET_ENV, raw, "offset out of range"))
}

fn parse_week_start(raw: &str) -> Result<Weekday, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "mon" | "monday" => Ok(Weekday::Mon),
        "sun" | "sunday" => Ok(Weekday::Sun),
        "sat" | "saturday" => Ok(Weekday::Sat),
        _ => Err(invalid(WEEK_START_ENV, raw, "expected mon, sat or sun")),
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<i64, ConfigError> {
    match raw.trim().parse::<i64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(invalid(key, raw, "expected a positive integer")),
    }
}

fn parse_delta(
    key: &'static str,
    raw: &str,
    unit: fn(i64) -> Option<TimeDelta>,
) -> Result<TimeDelta, ConfigError> {
    unit(parse_positive(key, raw)?).ok_or_else(|| invalid(key, raw, "duration out of range"))
}
