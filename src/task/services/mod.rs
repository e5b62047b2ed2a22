//! Application services for task lifecycle orchestration.

mod catalog;
mod lifecycle;
mod status;

pub use catalog::{
    CatalogServiceError, CatalogServiceResult, ProjectCatalogService, UpdateProjectRequest,
};
pub use lifecycle::{
    TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService, TaskPlacement,
    UpdateTaskRequest,
};
pub use status::{StatusRefreshReport, StatusTransition, TaskStatusService};
