//! Shared state and error taxonomy for the reward ledgers.
//!
//! The fungible and achievement engines read one [`LedgerState`]: a global
//! pause flag plus the role table. The state is passed explicitly (shared
//! via `Arc`), never ambient; only controller-gated methods write it.

pub mod error;
pub mod state;

pub use error::LedgerError;
pub use state::LedgerState;
