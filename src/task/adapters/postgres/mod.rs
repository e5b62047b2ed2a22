//! `PostgreSQL` adapters for tasks, projects and executors.

mod catalog;
mod models;
mod repository;
mod schema;

pub use catalog::{PostgresExecutorRepository, PostgresProjectRepository};
pub use repository::PostgresTaskRepository;
