//! `PostgreSQL` repositories for review history and settings.

use super::{
    models::{ReviewLogRow, SettingsRow},
    schema::{review_logs, user_settings},
};
use crate::pool::{PgPool, run_blocking};
use crate::review::{
    domain::{PersistedReviewLog, ReviewLog, ReviewLogId, ReviewOutcome, ReviewSettings},
    ports::{
        ReviewLogRepository, ReviewLogRepositoryError, ReviewLogRepositoryResult,
        SettingsRepository, SettingsRepositoryError, SettingsRepositoryResult,
    },
};
use crate::task::domain::{TaskId, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::upsert::excluded;

/// `PostgreSQL`-backed review log.
#[derive(Debug, Clone)]
pub struct PostgresReviewLogRepository {
    pool: PgPool,
}

impl PostgresReviewLogRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewLogRepository for PostgresReviewLogRepository {
    async fn append(&self, entry: &ReviewLog) -> ReviewLogRepositoryResult<()> {
        let entry_id = entry.id();
        let row = ReviewLogRow {
            id: entry_id.into_inner(),
            task_id: entry.task_id().into_inner(),
            owner_id: entry.owner_id().into_inner(),
            outcome: entry.outcome().as_str().to_owned(),
            note: entry.note().map(str::to_owned),
            new_due_date: entry.new_due_date(),
            reviewed_at: entry.reviewed_at(),
        };

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(review_logs::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ReviewLogRepositoryError::DuplicateEntry(entry_id)
                    }
                    _ => ReviewLogRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_task(&self, task_id: TaskId) -> ReviewLogRepositoryResult<Vec<ReviewLog>> {
        run_blocking(&self.pool, move |connection| {
            let rows = review_logs::table
                .filter(review_logs::task_id.eq(task_id.into_inner()))
                .select(ReviewLogRow::as_select())
                .order((review_logs::reviewed_at.asc(), review_logs::id.asc()))
                .load::<ReviewLogRow>(connection)
                .map_err(ReviewLogRepositoryError::persistence)?;
            rows.into_iter().map(row_to_log).collect()
        })
        .await
    }

    async fn exists_since(
        &self,
        owner_id: UserId,
        since: DateTime<Utc>,
    ) -> ReviewLogRepositoryResult<bool> {
        run_blocking(&self.pool, move |connection| {
            diesel::select(diesel::dsl::exists(
                review_logs::table
                    .filter(review_logs::owner_id.eq(owner_id.into_inner()))
                    .filter(review_logs::reviewed_at.ge(since)),
            ))
            .get_result::<bool>(connection)
            .map_err(ReviewLogRepositoryError::persistence)
        })
        .await
    }
}

fn row_to_log(row: ReviewLogRow) -> ReviewLogRepositoryResult<ReviewLog> {
    let outcome = ReviewOutcome::try_from(row.outcome.as_str())
        .map_err(ReviewLogRepositoryError::persistence)?;
    Ok(ReviewLog::from_persisted(PersistedReviewLog {
        id: ReviewLogId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        owner_id: UserId::from_uuid(row.owner_id),
        outcome,
        note: row.note,
        new_due_date: row.new_due_date,
        reviewed_at: row.reviewed_at,
    }))
}

/// `PostgreSQL`-backed settings store.
#[derive(Debug, Clone)]
pub struct PostgresSettingsRepository {
    pool: PgPool,
}

impl PostgresSettingsRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PostgresSettingsRepository {
    async fn find(&self, owner_id: UserId) -> SettingsRepositoryResult<Option<ReviewSettings>> {
        run_blocking(&self.pool, move |connection| {
            let row = user_settings::table
                .find(owner_id.into_inner())
                .select(SettingsRow::as_select())
                .first::<SettingsRow>(connection)
                .optional()
                .map_err(SettingsRepositoryError::persistence)?;
            Ok(row.map(|found| {
                ReviewSettings::new(
                    UserId::from_uuid(found.owner_id),
                    found.review_time,
                    found.push_notifications,
                )
            }))
        })
        .await
    }

    async fn save(&self, settings: &ReviewSettings) -> SettingsRepositoryResult<()> {
        let row = SettingsRow {
            owner_id: settings.owner_id.into_inner(),
            review_time: settings.review_time,
            push_notifications: settings.push_notifications,
        };

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(user_settings::table)
                .values(&row)
                .on_conflict(user_settings::owner_id)
                .do_update()
                .set((
                    user_settings::review_time.eq(excluded(user_settings::review_time)),
                    user_settings::push_notifications
                        .eq(excluded(user_settings::push_notifications)),
                ))
                .execute(connection)
                .map_err(SettingsRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }
}
