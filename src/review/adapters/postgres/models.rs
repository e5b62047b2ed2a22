//! Diesel row models for review persistence.

use super::schema::{review_logs, user_settings};
use chrono::{DateTime, NaiveTime, Utc};
use diesel::prelude::*;

/// Row of the `review_logs` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = review_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReviewLogRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Reviewed task.
    pub task_id: uuid::Uuid,
    /// Reviewing user.
    pub owner_id: uuid::Uuid,
    /// Recorded outcome.
    pub outcome: String,
    /// Optional reviewer note.
    pub note: Option<String>,
    /// Replacement due date for extensions.
    pub new_due_date: Option<DateTime<Utc>>,
    /// Review timestamp.
    pub reviewed_at: DateTime<Utc>,
}

/// Row of the `user_settings` table.
#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = user_settings)]
#[diesel(primary_key(owner_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SettingsRow {
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Local daily review time.
    pub review_time: NaiveTime,
    /// Push notification preference.
    pub push_notifications: bool,
}
