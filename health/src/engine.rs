//! The condition reward engine.

use std::collections::HashMap;
use std::sync::Arc;

use salus_ledger::{LedgerError, LedgerState};
use salus_types::{ConditionTier, CreditAmount, RewardParams, Role, Timestamp, WalletAddress};

use crate::record::{HealthRecord, HealthStatistics};

#[derive(Default)]
struct HolderState {
    balance: CreditAmount,
    /// Oldest first; only ever appended to.
    history: Vec<HealthRecord>,
    statistics: HealthStatistics,
}

/// Mints credits for reported conditions and maintains per-holder history.
///
/// Role-gated like the other ledgers; the global pause flag covers the
/// fungible and achievement ledgers only, so condition reports keep landing
/// while those are halted.
pub struct ConditionEngine {
    holders: HashMap<WalletAddress, HolderState>,
    state: Arc<LedgerState>,
    params: RewardParams,
}

impl ConditionEngine {
    pub fn new(state: Arc<LedgerState>, params: RewardParams) -> Self {
        Self {
            holders: HashMap::new(),
            state,
            params,
        }
    }

    /// Record a condition report and mint its severity-tiered reward.
    ///
    /// The amount is a decreasing step function of severity; Severe mints
    /// zero. The record and statistics update land even for a zero mint —
    /// history is the medical signal, the credit is just the incentive.
    pub fn mint_for_condition(
        &mut self,
        caller: &WalletAddress,
        recipient: &WalletAddress,
        tier: ConditionTier,
        confidence: u8,
        now: Timestamp,
    ) -> Result<CreditAmount, LedgerError> {
        self.state.ensure_can_mint(caller, Role::Minter)?;

        let amount = CreditAmount::new(match tier {
            ConditionTier::Normal => self.params.condition_reward_normal,
            ConditionTier::Mild => self.params.condition_reward_mild,
            ConditionTier::Severe => 0,
        });

        let holder = self.holders.entry(recipient.clone()).or_default();
        holder.balance = holder.balance.saturating_add(amount);
        holder.history.push(HealthRecord {
            tier,
            confidence,
            timestamp: now,
        });
        holder.statistics.record(tier);

        tracing::info!(%recipient, %tier, confidence, %amount, "condition report recorded");
        Ok(amount)
    }

    /// The full report history for an address, oldest first.
    pub fn history(&self, address: &WalletAddress) -> &[HealthRecord] {
        self.holders
            .get(address)
            .map(|h| h.history.as_slice())
            .unwrap_or(&[])
    }

    /// Aggregate counts by tier. O(1) — maintained on every append.
    pub fn statistics(&self, address: &WalletAddress) -> HealthStatistics {
        self.holders
            .get(address)
            .map(|h| h.statistics)
            .unwrap_or_default()
    }

    /// Condition-ledger credit balance for an address.
    pub fn balance(&self, address: &WalletAddress) -> CreditAmount {
        self.holders
            .get(address)
            .map(|h| h.balance)
            .unwrap_or(CreditAmount::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(tag: &str) -> WalletAddress {
        WalletAddress::new(format!("sal_{tag}"))
    }

    fn engine() -> (ConditionEngine, WalletAddress) {
        let controller = addr("c0");
        let minter = addr("m0");
        let state = Arc::new(LedgerState::with_controller(controller.clone()));
        state
            .grant_role(&controller, minter.clone(), Role::Minter)
            .unwrap();
        (
            ConditionEngine::new(state, RewardParams::default()),
            minter,
        )
    }

    #[test]
    fn normal_report_mints_full_amount() {
        let (mut engine, minter) = engine();
        let user = addr("u1");
        let minted = engine
            .mint_for_condition(&minter, &user, ConditionTier::Normal, 95, Timestamp::new(1000))
            .unwrap();
        assert_eq!(minted.raw(), 10);
        assert_eq!(engine.balance(&user).raw(), 10);

        let history = engine.history(&user);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].tier, ConditionTier::Normal);
        assert_eq!(history[0].confidence, 95);
    }

    #[test]
    fn mild_report_mints_reduced_amount() {
        let (mut engine, minter) = engine();
        let user = addr("u1");
        let minted = engine
            .mint_for_condition(&minter, &user, ConditionTier::Mild, 60, Timestamp::new(1000))
            .unwrap();
        assert_eq!(minted.raw(), 5);
    }

    #[test]
    fn severe_mints_zero_but_still_records() {
        let (mut engine, minter) = engine();
        let user = addr("u1");

        for confidence in [0u8, 50, 100] {
            let minted = engine
                .mint_for_condition(
                    &minter,
                    &user,
                    ConditionTier::Severe,
                    confidence,
                    Timestamp::new(1000),
                )
                .unwrap();
            assert!(minted.is_zero());
        }

        assert_eq!(engine.balance(&user).raw(), 0);
        assert_eq!(engine.history(&user).len(), 3);
        assert_eq!(engine.statistics(&user).severe_count, 3);
    }

    #[test]
    fn unauthorized_caller_leaves_no_trace() {
        let (mut engine, _) = engine();
        let user = addr("u1");
        assert!(matches!(
            engine.mint_for_condition(&user, &user, ConditionTier::Normal, 90, Timestamp::new(0)),
            Err(LedgerError::UnauthorizedMint(_))
        ));
        assert!(engine.history(&user).is_empty());
        assert_eq!(engine.statistics(&user), HealthStatistics::default());
    }

    #[test]
    fn history_is_ordered_oldest_first() {
        let (mut engine, minter) = engine();
        let user = addr("u1");
        for (i, tier) in [ConditionTier::Normal, ConditionTier::Mild, ConditionTier::Severe]
            .into_iter()
            .enumerate()
        {
            engine
                .mint_for_condition(&minter, &user, tier, 80, Timestamp::new(1000 + i as u64))
                .unwrap();
        }
        let history = engine.history(&user);
        assert_eq!(history[0].timestamp, Timestamp::new(1000));
        assert_eq!(history[2].timestamp, Timestamp::new(1002));
        assert_eq!(history[2].tier, ConditionTier::Severe);
    }

    #[test]
    fn statistics_match_history_recount() {
        let (mut engine, minter) = engine();
        let user = addr("u1");
        let reports = [
            ConditionTier::Normal,
            ConditionTier::Normal,
            ConditionTier::Mild,
            ConditionTier::Severe,
            ConditionTier::Normal,
            ConditionTier::Mild,
        ];
        for (i, tier) in reports.into_iter().enumerate() {
            engine
                .mint_for_condition(&minter, &user, tier, 70, Timestamp::new(i as u64))
                .unwrap();
        }

        let stats = engine.statistics(&user);
        let history = engine.history(&user);
        assert_eq!(stats.total_tests as usize, history.len());
        assert_eq!(
            stats.normal_count as usize,
            history.iter().filter(|r| r.tier == ConditionTier::Normal).count()
        );
        assert_eq!(
            stats.mild_count as usize,
            history.iter().filter(|r| r.tier == ConditionTier::Mild).count()
        );
        assert_eq!(
            stats.severe_count as usize,
            history.iter().filter(|r| r.tier == ConditionTier::Severe).count()
        );
    }

    #[test]
    fn condition_reports_land_while_ledgers_paused() {
        let controller = addr("c0");
        let minter = addr("m0");
        let state = Arc::new(LedgerState::with_controller(controller.clone()));
        state
            .grant_role(&controller, minter.clone(), Role::Minter)
            .unwrap();
        let mut engine = ConditionEngine::new(state.clone(), RewardParams::default());

        state.pause(&controller).unwrap();
        engine
            .mint_for_condition(&minter, &addr("u1"), ConditionTier::Mild, 40, Timestamp::new(0))
            .unwrap();
        assert_eq!(engine.history(&addr("u1")).len(), 1);
    }
}
