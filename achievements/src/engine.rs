//! The achievement engine.

use std::collections::HashMap;
use std::sync::Arc;

use salus_ledger::{LedgerError, LedgerState};
use salus_types::{RewardParams, Role, Timestamp, WalletAddress};

use crate::token::{Achievement, SaleRecord};

/// Mints unique achievement tokens and records their sales.
pub struct AchievementEngine {
    tokens: HashMap<u64, Achievement>,
    sales: HashMap<u64, Vec<SaleRecord>>,
    /// Accumulated sale proceeds per recipient (sellers and the charity).
    payouts: HashMap<WalletAddress, u128>,
    next_token_id: u64,
    charity: WalletAddress,
    state: Arc<LedgerState>,
    params: RewardParams,
}

impl AchievementEngine {
    pub fn new(state: Arc<LedgerState>, params: RewardParams, charity: WalletAddress) -> Self {
        Self {
            tokens: HashMap::new(),
            sales: HashMap::new(),
            payouts: HashMap::new(),
            next_token_id: 0,
            charity,
            state,
            params,
        }
    }

    /// Mint a new achievement. Controller only.
    pub fn mint(
        &mut self,
        caller: &WalletAddress,
        recipient: &WalletAddress,
        kind: u16,
        metadata_ref: impl Into<String>,
        now: Timestamp,
    ) -> Result<u64, LedgerError> {
        self.state.ensure_unpaused()?;
        self.state.ensure_can_mint(caller, Role::Controller)?;

        let token_id = self.next_token_id;
        self.next_token_id += 1;
        self.tokens.insert(
            token_id,
            Achievement {
                token_id,
                kind,
                recipient: recipient.clone(),
                metadata_ref: metadata_ref.into(),
                minted_at: now,
            },
        );
        tracing::info!(%recipient, token_id, kind, "achievement minted");
        Ok(token_id)
    }

    /// Record a sale, splitting proceeds between seller and charity.
    ///
    /// The royalty is floored (`price * percent / 100`); the seller receives
    /// the remainder, so the two payouts always sum to `price` exactly.
    /// Both credits and the sale record land in one `&mut` step.
    pub fn record_sale(
        &mut self,
        caller: &WalletAddress,
        token_id: u64,
        price: u128,
        now: Timestamp,
    ) -> Result<SaleRecord, LedgerError> {
        self.state.ensure_unpaused()?;
        self.state.ensure_can_mint(caller, Role::Minter)?;

        let seller = self
            .tokens
            .get(&token_id)
            .map(|t| t.recipient.clone())
            .ok_or(LedgerError::UnknownToken(token_id))?;

        // floor(price * percent / 100) without u128 overflow on huge prices:
        // split price into hundreds and remainder.
        let percent = self.params.charity_royalty_percent;
        let royalty = (price / 100) * percent + (price % 100) * percent / 100;
        let payout = price - royalty;

        *self.payouts.entry(self.charity.clone()).or_default() += royalty;
        *self.payouts.entry(seller).or_default() += payout;

        let record = SaleRecord {
            token_id,
            price,
            royalty,
            timestamp: now,
        };
        self.sales.entry(token_id).or_default().push(record.clone());
        tracing::info!(token_id, price, royalty, "sale recorded");
        Ok(record)
    }

    pub fn achievement(&self, token_id: u64) -> Result<&Achievement, LedgerError> {
        self.tokens
            .get(&token_id)
            .ok_or(LedgerError::UnknownToken(token_id))
    }

    /// Sales recorded for a token, oldest first.
    pub fn sales(&self, token_id: u64) -> &[SaleRecord] {
        self.sales
            .get(&token_id)
            .map(|s| s.as_slice())
            .unwrap_or(&[])
    }

    /// All achievements minted to an address.
    pub fn owned_by(&self, address: &WalletAddress) -> Vec<&Achievement> {
        let mut owned: Vec<_> = self
            .tokens
            .values()
            .filter(|t| &t.recipient == address)
            .collect();
        owned.sort_by_key(|t| t.token_id);
        owned
    }

    /// Accumulated sale proceeds credited to an address.
    pub fn payout_balance(&self, address: &WalletAddress) -> u128 {
        self.payouts.get(address).copied().unwrap_or(0)
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}
