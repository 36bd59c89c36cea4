//! Per-address reward account state.

use salus_types::{CreditAmount, Timestamp};
use serde::{Deserialize, Serialize};

/// Ledger row for one address.
///
/// Balance is monotonically non-decreasing (burning is out of scope);
/// `last_exercise_at` only ever advances.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RewardAccount {
    /// Current credit balance.
    pub balance: CreditAmount,
    /// When the last exercise reward was claimed, if ever.
    pub last_exercise_at: Option<Timestamp>,
    /// Lifetime credits minted to this address.
    pub total_minted: CreditAmount,
}

impl RewardAccount {
    /// Apply a mint. Kept private to the crate so every credit goes through
    /// the engine's gate checks.
    pub(crate) fn credit(&mut self, amount: CreditAmount) {
        self.balance = self.balance.saturating_add(amount);
        self.total_minted = self.total_minted.saturating_add(amount);
    }
}
