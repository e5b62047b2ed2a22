//! `PostgreSQL` repositories for projects and executors.

use super::{
    models::{ExecutorRow, ProjectChanges, ProjectRow},
    schema::{executors, projects},
};
use crate::pool::{PgPool, run_blocking};
use crate::schedule::TimeWindow;
use crate::task::{
    domain::{Executor, ExecutorId, PersistedProjectData, Project, ProjectId, UserId},
    ports::{
        CatalogRepositoryError, CatalogRepositoryResult, ExecutorRepository, ProjectRepository,
    },
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn store(&self, project: &Project) -> CatalogRepositoryResult<()> {
        let project_id = project.id();
        let row = ProjectRow {
            id: project_id.into_inner(),
            owner_id: project.owner_id().into_inner(),
            name: project.name().to_owned(),
            description: project.description().map(str::to_owned),
            color_icon: project.color_icon().map(str::to_owned),
            start_date: project.window().start(),
            planned_finish: project.window().end(),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        };

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(projects::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        CatalogRepositoryError::DuplicateProject(project_id)
                    }
                    _ => CatalogRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, project: &Project) -> CatalogRepositoryResult<()> {
        let project_id = project.id();
        let changes = ProjectChanges {
            name: project.name().to_owned(),
            description: project.description().map(str::to_owned),
            color_icon: project.color_icon().map(str::to_owned),
            start_date: project.window().start(),
            planned_finish: project.window().end(),
            updated_at: project.updated_at(),
        };

        run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(projects::table.find(project_id.into_inner()))
                .set(&changes)
                .execute(connection)
                .map_err(CatalogRepositoryError::persistence)?;
            if updated == 0 {
                return Err(CatalogRepositoryError::ProjectNotFound(project_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: ProjectId) -> CatalogRepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            let removed = diesel::delete(projects::table.find(id.into_inner()))
                .execute(connection)
                .map_err(CatalogRepositoryError::persistence)?;
            if removed == 0 {
                return Err(CatalogRepositoryError::ProjectNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> CatalogRepositoryResult<Option<Project>> {
        run_blocking(&self.pool, move |connection| {
            let row = projects::table
                .find(id.into_inner())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(CatalogRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn find_by_owner(&self, owner_id: UserId) -> CatalogRepositoryResult<Vec<Project>> {
        run_blocking(&self.pool, move |connection| {
            let rows = projects::table
                .filter(projects::owner_id.eq(owner_id.into_inner()))
                .select(ProjectRow::as_select())
                .order((projects::start_date.asc(), projects::id.asc()))
                .load::<ProjectRow>(connection)
                .map_err(CatalogRepositoryError::persistence)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }
}

/// `PostgreSQL`-backed executor repository.
#[derive(Debug, Clone)]
pub struct PostgresExecutorRepository {
    pool: PgPool,
}

impl PostgresExecutorRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExecutorRepository for PostgresExecutorRepository {
    async fn store(&self, executor: &Executor) -> CatalogRepositoryResult<()> {
        let executor_id = executor.id();
        let row = ExecutorRow {
            id: executor_id.into_inner(),
            owner_id: executor.owner_id().into_inner(),
            name: executor.name().to_owned(),
            color_icon: executor.color_icon().map(str::to_owned),
            created_at: executor.created_at(),
        };

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(executors::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        CatalogRepositoryError::DuplicateExecutor(executor_id)
                    }
                    _ => CatalogRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ExecutorId) -> CatalogRepositoryResult<Option<Executor>> {
        run_blocking(&self.pool, move |connection| {
            let row = executors::table
                .find(id.into_inner())
                .select(ExecutorRow::as_select())
                .first::<ExecutorRow>(connection)
                .optional()
                .map_err(CatalogRepositoryError::persistence)?;
            Ok(row.map(row_to_executor))
        })
        .await
    }

    async fn find_by_owner(&self, owner_id: UserId) -> CatalogRepositoryResult<Vec<Executor>> {
        run_blocking(&self.pool, move |connection| {
            let rows = executors::table
                .filter(executors::owner_id.eq(owner_id.into_inner()))
                .select(ExecutorRow::as_select())
                .order((executors::name.asc(), executors::id.asc()))
                .load::<ExecutorRow>(connection)
                .map_err(CatalogRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_executor).collect())
        })
        .await
    }
}

fn row_to_project(row: ProjectRow) -> CatalogRepositoryResult<Project> {
    let window = TimeWindow::new(row.start_date, row.planned_finish)
        .map_err(CatalogRepositoryError::persistence)?;
    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        owner_id: UserId::from_uuid(row.owner_id),
        name: row.name,
        description: row.description,
        color_icon: row.color_icon,
        window,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn row_to_executor(row: ExecutorRow) -> Executor {
    Executor::from_persisted(
        ExecutorId::from_uuid(row.id),
        UserId::from_uuid(row.owner_id),
        row.name,
        row.color_icon,
        row.created_at,
    )
}
