//! Unit tests for the review module.

mod queue_service_tests;
mod support;
