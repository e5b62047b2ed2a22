//! Diesel row models for task, project and executor persistence.

use super::schema::{executors, projects, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row of the `tasks` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Containing project.
    pub project_id: uuid::Uuid,
    /// Parent task for subtasks.
    pub parent_id: Option<uuid::Uuid>,
    /// Assigned executor.
    pub executor_id: Option<uuid::Uuid>,
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Start of the task window.
    pub start_date: DateTime<Utc>,
    /// End of the task window.
    pub due_date: DateTime<Utc>,
    /// Hourly escalation flag.
    pub is_urgent: bool,
    /// Task lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Mutable columns of a task row.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChanges {
    /// Assigned executor.
    pub executor_id: Option<uuid::Uuid>,
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Start of the task window.
    pub start_date: DateTime<Utc>,
    /// End of the task window.
    pub due_date: DateTime<Utc>,
    /// Hourly escalation flag.
    pub is_urgent: bool,
    /// Task lifecycle status.
    pub status: String,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Row of the `projects` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Color/icon token.
    pub color_icon: Option<String>,
    /// Project start.
    pub start_date: DateTime<Utc>,
    /// Planned finish.
    pub planned_finish: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Mutable columns of a project row.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(treat_none_as_null = true)]
pub struct ProjectChanges {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Color/icon token.
    pub color_icon: Option<String>,
    /// Project start.
    pub start_date: DateTime<Utc>,
    /// Planned finish.
    pub planned_finish: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Row of the `executors` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = executors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ExecutorRow {
    /// Executor identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Color/icon token.
    pub color_icon: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
