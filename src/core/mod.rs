//! Core constants and the tick clock.

pub mod constants;
pub mod scheduler;
