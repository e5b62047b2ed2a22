//! Adapter implementations of the review ports.

pub mod memory;
pub mod notifier;
pub mod postgres;
