//! `PostgreSQL` adapters for the review log and review settings.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresReviewLogRepository, PostgresSettingsRepository};
