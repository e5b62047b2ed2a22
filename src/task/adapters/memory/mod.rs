//! In-memory adapters for tests and single-process use.

mod catalog;
mod task;

pub use catalog::{InMemoryExecutorRepository, InMemoryProjectRepository};
pub use task::InMemoryTaskRepository;
