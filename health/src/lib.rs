//! Condition reward ledger.
//!
//! Mints credits as a decreasing step function of reported severity —
//! Severe findings mint nothing, so a medically urgent signal carries no
//! incentive to game — while every report lands in an append-only per-holder
//! history with incrementally maintained statistics.

pub mod engine;
pub mod record;

pub use engine::ConditionEngine;
pub use record::{HealthRecord, HealthStatistics};
