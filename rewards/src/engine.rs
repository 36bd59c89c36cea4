//! The fungible reward engine.
//!
//! Every mutating operation runs the same gate sequence: pause check, role
//! check, then the per-address mutation. The whole sequence executes under
//! one `&mut self` borrow, so check-then-write pairs (the exercise cooldown)
//! are indivisible — callers that need cross-thread sharing wrap the engine
//! in a mutex, giving a single global ordering of mutating calls.

use std::collections::HashMap;
use std::sync::Arc;

use salus_ledger::{LedgerError, LedgerState};
use salus_types::{CreditAmount, RewardParams, Role, Timestamp, WalletAddress};
use salus_utils::same_calendar_day;
use serde::{Deserialize, Serialize};

use crate::account::RewardAccount;

/// Doctor-visit discount tiers, keyed off the current credit balance.
///
/// Monotone: a higher balance never yields a lower tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountTier {
    None,
    Bronze,
    Silver,
    Gold,
}

impl DiscountTier {
    /// Discount percentage applied at the clinic.
    pub fn percent(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Bronze => 5,
            Self::Silver => 10,
            Self::Gold => 20,
        }
    }
}

/// The fungible reward credit ledger.
pub struct RewardEngine {
    accounts: HashMap<WalletAddress, RewardAccount>,
    state: Arc<LedgerState>,
    params: RewardParams,
}

impl RewardEngine {
    pub fn new(state: Arc<LedgerState>, params: RewardParams) -> Self {
        Self {
            accounts: HashMap::new(),
            state,
            params,
        }
    }

    /// Mint the fixed eye-test reward.
    pub fn mint_for_eye_test(
        &mut self,
        caller: &WalletAddress,
        recipient: &WalletAddress,
        now: Timestamp,
    ) -> Result<CreditAmount, LedgerError> {
        let amount = CreditAmount::new(self.params.eye_test_reward);
        self.gated_mint(caller, recipient, amount, "eye_test", now)
    }

    /// Mint the daily exercise reward, at most once per UTC calendar day.
    ///
    /// The cooldown check and the day update happen under the same borrow,
    /// so two concurrent claims cannot both pass the check.
    pub fn mint_for_daily_exercise(
        &mut self,
        caller: &WalletAddress,
        recipient: &WalletAddress,
        now: Timestamp,
    ) -> Result<CreditAmount, LedgerError> {
        self.state.ensure_unpaused()?;
        self.state.ensure_can_mint(caller, Role::Minter)?;

        let account = self.accounts.entry(recipient.clone()).or_default();
        if let Some(previous) = account.last_exercise_at {
            if same_calendar_day(previous, now) {
                return Err(LedgerError::AlreadyRewardedToday);
            }
        }

        let amount = CreditAmount::new(self.params.exercise_reward);
        account.credit(amount);
        account.last_exercise_at = Some(now);
        tracing::info!(%recipient, %amount, day = now.day_number(), "exercise reward minted");
        Ok(amount)
    }

    /// Mint the family-member reward. Deliberately uncapped per address.
    pub fn mint_for_family_member(
        &mut self,
        caller: &WalletAddress,
        recipient: &WalletAddress,
        now: Timestamp,
    ) -> Result<CreditAmount, LedgerError> {
        let amount = CreditAmount::new(self.params.family_member_reward);
        self.gated_mint(caller, recipient, amount, "family_member", now)
    }

    /// The discount tier for an address's current balance. Pure lookup,
    /// no gating.
    pub fn doctor_visit_discount(&self, address: &WalletAddress) -> DiscountTier {
        let balance = self.balance(address).raw();
        if balance >= self.params.discount_gold_threshold {
            DiscountTier::Gold
        } else if balance >= self.params.discount_silver_threshold {
            DiscountTier::Silver
        } else if balance >= self.params.discount_bronze_threshold {
            DiscountTier::Bronze
        } else {
            DiscountTier::None
        }
    }

    pub fn balance(&self, address: &WalletAddress) -> CreditAmount {
        self.accounts
            .get(address)
            .map(|a| a.balance)
            .unwrap_or(CreditAmount::ZERO)
    }

    pub fn account(&self, address: &WalletAddress) -> Option<&RewardAccount> {
        self.accounts.get(address)
    }

    /// Shared ledger state (pause flag + roles).
    pub fn state(&self) -> &Arc<LedgerState> {
        &self.state
    }

    fn gated_mint(
        &mut self,
        caller: &WalletAddress,
        recipient: &WalletAddress,
        amount: CreditAmount,
        event: &str,
        now: Timestamp,
    ) -> Result<CreditAmount, LedgerError> {
        self.state.ensure_unpaused()?;
        self.state.ensure_can_mint(caller, Role::Minter)?;

        self.accounts
            .entry(recipient.clone())
            .or_default()
            .credit(amount);
        tracing::info!(%recipient, %amount, event, at = now.as_secs(), "reward minted");
        Ok(amount)
    }
}
