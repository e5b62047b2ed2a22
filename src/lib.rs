//! FastCheck: task status, scheduling constraint and review engine.
//!
//! This crate holds the core of a personal task tracker: tasks live inside
//! projects, may have one level of subtasks, derive their status from the
//! clock and are resolved by a daily review.
//!
//! # Architecture
//!
//! FastCheck follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and notification
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`schedule`]: Time windows, calendar arithmetic and date constraints
//! - [`task`]: Tasks, projects, executors and the status state machine
//! - [`review`]: Review decisions, the review queue and escalation
//! - [`worker`]: Periodic status refresh
//! - [`config`]: Environment-driven configuration
//! - [`clock`]: Deterministic clock implementation
//! - [`pool`]: Shared `PostgreSQL` connection pool

pub mod clock;
pub mod config;
pub mod pool;
pub mod review;
pub mod schedule;
pub mod task;
pub mod worker;
