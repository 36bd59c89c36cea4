//! Shared utilities for the Salus protocol.

pub mod day;
pub mod logging;

pub use day::same_calendar_day;
pub use logging::init_tracing;
