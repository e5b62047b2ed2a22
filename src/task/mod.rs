//! Task, project and executor management.
//!
//! Tasks belong to a project, may be nested one level under another task
//! and carry a status derived from their start and due dates until a review
//! resolves them. The module follows hexagonal architecture:
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
