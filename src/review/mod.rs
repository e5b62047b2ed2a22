//! Review workflow for overdue tasks.
//!
//! A review resolves a task as completed, cancelled or extended and appends
//! an entry to the review log. This module also decides which tasks belong in
//! the review queue, when the daily review prompt is due and which pending
//! tasks are visually escalated. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
