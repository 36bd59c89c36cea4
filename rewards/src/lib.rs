//! Fungible reward credit ledger.
//!
//! Mints capped-rule credits for discrete off-chain health events: eye
//! tests, daily exercise (one per UTC calendar day), and family-member
//! additions. Balances feed a tiered doctor-visit discount lookup.

pub mod account;
pub mod engine;

pub use account::RewardAccount;
pub use engine::{DiscountTier, RewardEngine};
