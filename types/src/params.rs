//! Protocol parameters — reward amounts, discount thresholds, and
//! authentication windows.
//!
//! Everything here is operator-tunable via configuration; the defaults are
//! the reference deployment values.

use serde::{Deserialize, Serialize};

/// All tunable parameters for the Salus reward protocol.
///
/// Fields omitted from a config file fall back to the defaults below.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardParams {
    // ── Fungible rewards ─────────────────────────────────────────────────
    /// Credits minted for a completed eye test.
    pub eye_test_reward: u128,

    /// Credits minted for daily exercise. Smaller than the eye-test reward
    /// and limited to once per UTC calendar day per address.
    pub exercise_reward: u128,

    /// Credits minted for adding a family member. Not rate-limited.
    pub family_member_reward: u128,

    // ── Condition rewards ────────────────────────────────────────────────
    /// Credits minted for a condition report classified Normal.
    pub condition_reward_normal: u128,

    /// Credits minted for a condition report classified Mild.
    /// Must not exceed `condition_reward_normal`.
    pub condition_reward_mild: u128,

    // ── Doctor-visit discount tiers ──────────────────────────────────────
    /// Minimum balance for the bronze discount tier.
    pub discount_bronze_threshold: u128,

    /// Minimum balance for the silver discount tier.
    pub discount_silver_threshold: u128,

    /// Minimum balance for the gold discount tier.
    pub discount_gold_threshold: u128,

    // ── Achievements ─────────────────────────────────────────────────────
    /// Percentage of every recorded sale routed to the charity recipient.
    /// The royalty is floored; the remainder goes to the seller, so
    /// `royalty + payout == price` exactly.
    pub charity_royalty_percent: u128,

    // ── Authentication windows ───────────────────────────────────────────
    /// Seconds an issued challenge nonce stays valid.
    pub nonce_ttl_secs: u64,

    /// Maximum number of outstanding challenge nonces across all addresses.
    pub max_pending_nonces: usize,

    /// Seconds an issued session stays valid.
    pub session_ttl_secs: u64,
}

impl Default for RewardParams {
    fn default() -> Self {
        Self {
            eye_test_reward: 50,
            exercise_reward: 10,
            family_member_reward: 25,
            condition_reward_normal: 10,
            condition_reward_mild: 5,
            discount_bronze_threshold: 100,
            discount_silver_threshold: 500,
            discount_gold_threshold: 1_000,
            charity_royalty_percent: 10,
            nonce_ttl_secs: 300,
            max_pending_nonces: 65_536,
            session_ttl_secs: 86_400,
        }
    }
}
