//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{TaskChanges, TaskRow},
    schema::tasks,
};
use crate::pool::{PgPool, run_blocking};
use crate::schedule::TimeWindow;
use crate::task::{
    domain::{
        ExecutorId, PersistedTaskData, ProjectId, Task, TaskId, TaskStatus, UserId,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

const RESOLVED_STATUSES: [&str; 2] = [
    TaskStatus::Completed.as_str(),
    TaskStatus::Cancelled.as_str(),
];

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load<F>(&self, query: F) -> TaskRepositoryResult<Vec<Task>>
    where
        F: FnOnce(&mut PgConnection) -> QueryResult<Vec<TaskRow>> + Send + 'static,
    {
        run_blocking(&self.pool, move |connection| {
            let rows = query(connection).map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_row(task);

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changes = to_changes(task);

        run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(tasks::table.find(task_id.into_inner()))
                .set(&changes)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<usize> {
        run_blocking(&self.pool, move |connection| {
            let removed = connection.transaction::<_, DieselError, _>(|conn| {
                let subtasks =
                    diesel::delete(tasks::table.filter(tasks::parent_id.eq(id.into_inner())))
                        .execute(conn)?;
                let own = diesel::delete(tasks::table.find(id.into_inner())).execute(conn)?;
                if own == 0 {
                    return Err(DieselError::NotFound);
                }
                Ok(subtasks + own)
            });
            match removed {
                Ok(count) => Ok(count),
                Err(DieselError::NotFound) => Err(TaskRepositoryError::NotFound(id)),
                Err(err) => Err(TaskRepositoryError::persistence(err)),
            }
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        run_blocking(&self.pool, move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_siblings(
        &self,
        project_id: ProjectId,
        parent_id: Option<TaskId>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.load(move |connection| {
            let mut query = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .select(TaskRow::as_select())
                .into_boxed();
            query = match parent_id {
                Some(parent) => query.filter(tasks::parent_id.eq(parent.into_inner())),
                None => query.filter(tasks::parent_id.is_null()),
            };
            query
                .order((tasks::start_date.asc(), tasks::id.asc()))
                .load::<TaskRow>(connection)
        })
        .await
    }

    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.load(move |connection| {
            tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .select(TaskRow::as_select())
                .order((tasks::start_date.asc(), tasks::id.asc()))
                .load::<TaskRow>(connection)
        })
        .await
    }

    async fn find_in_window(
        &self,
        owner_id: UserId,
        window: TimeWindow,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.load(move |connection| {
            tasks::table
                .filter(tasks::owner_id.eq(owner_id.into_inner()))
                .filter(tasks::start_date.lt(window.end()))
                .filter(tasks::due_date.gt(window.start()))
                .select(TaskRow::as_select())
                .order((tasks::start_date.asc(), tasks::id.asc()))
                .load::<TaskRow>(connection)
        })
        .await
    }

    async fn find_active_by_owner(&self, owner_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.load(move |connection| {
            tasks::table
                .filter(tasks::owner_id.eq(owner_id.into_inner()))
                .filter(tasks::status.ne_all(RESOLVED_STATUSES))
                .select(TaskRow::as_select())
                .order((tasks::start_date.asc(), tasks::id.asc()))
                .load::<TaskRow>(connection)
        })
        .await
    }

    async fn find_active(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.load(move |connection| {
            tasks::table
                .filter(tasks::status.ne_all(RESOLVED_STATUSES))
                .select(TaskRow::as_select())
                .order((tasks::start_date.asc(), tasks::id.asc()))
                .load::<TaskRow>(connection)
        })
        .await
    }
}

fn to_row(task: &Task) -> TaskRow {
    TaskRow {
        id: task.id().into_inner(),
        owner_id: task.owner_id().into_inner(),
        project_id: task.project_id().into_inner(),
        parent_id: task.parent_id().map(TaskId::into_inner),
        executor_id: task.executor_id().map(ExecutorId::into_inner),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        start_date: task.start_date(),
        due_date: task.due_date(),
        is_urgent: task.is_urgent(),
        status: task.status().as_str().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changes(task: &Task) -> TaskChanges {
    TaskChanges {
        executor_id: task.executor_id().map(ExecutorId::into_inner),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        start_date: task.start_date(),
        due_date: task.due_date(),
        is_urgent: task.is_urgent(),
        status: task.status().as_str().to_owned(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        owner_id,
        project_id,
        parent_id,
        executor_id,
        title,
        description,
        start_date,
        due_date,
        is_urgent,
        status: persisted_status,
        created_at,
        updated_at,
    } = row;

    let window = TimeWindow::new(start_date, due_date).map_err(TaskRepositoryError::persistence)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        owner_id: UserId::from_uuid(owner_id),
        project_id: ProjectId::from_uuid(project_id),
        parent_id: parent_id.map(TaskId::from_uuid),
        executor_id: executor_id.map(ExecutorId::from_uuid),
        title,
        description,
        window,
        is_urgent,
        status,
        created_at,
        updated_at,
    }))
}
