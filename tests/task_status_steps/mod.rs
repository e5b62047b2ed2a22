//! Step definitions for task status BDD scenarios.

mod given;
mod then;
mod when;
pub mod world;
