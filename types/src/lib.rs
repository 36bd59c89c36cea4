//! Fundamental types for the Salus protocol.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: wallet addresses, credit amounts, timestamps, key material,
//! roles, condition tiers, and reward parameters.

pub mod address;
pub mod amount;
pub mod condition;
pub mod keys;
pub mod params;
pub mod role;
pub mod time;

pub use address::WalletAddress;
pub use amount::CreditAmount;
pub use condition::ConditionTier;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use params::RewardParams;
pub use role::Role;
pub use time::Timestamp;
