//! Unique achievement token ledger.
//!
//! Achievements are non-fungible records with monotonically assigned ids.
//! Recorded sales split proceeds between the seller and a fixed charity
//! recipient in one atomic step.

pub mod engine;
pub mod token;

pub use engine::AchievementEngine;
pub use token::{Achievement, SaleRecord};
