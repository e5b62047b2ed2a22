//! Port contracts for task, project and executor persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod catalog;
pub mod repository;

pub use catalog::{
    CatalogRepositoryError, CatalogRepositoryResult, ExecutorRepository, ProjectRepository,
};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};

#[cfg(test)]
pub use repository::MockTaskRepository;
