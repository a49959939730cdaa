//! Step definitions for manual reordering scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
