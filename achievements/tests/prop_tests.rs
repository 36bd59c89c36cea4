use std::sync::Arc;

use proptest::prelude::*;

use salus_achievements::AchievementEngine;
use salus_ledger::LedgerState;
use salus_types::{RewardParams, Timestamp, WalletAddress};

fn addr(tag: &str) -> WalletAddress {
    WalletAddress::new(format!("sal_{tag}"))
}

proptest! {
    /// Royalty + seller payout equals the sale price exactly — no rounding
    /// leak at any price.
    #[test]
    fn sale_split_conserves_price(price in 1u128..10_000) {
        let controller = addr("c0");
        let state = Arc::new(LedgerState::with_controller(controller.clone()));
        let mut engine =
            AchievementEngine::new(state, RewardParams::default(), addr("charity"));

        let token = engine
            .mint(&controller, &addr("seller"), 0, "ref", Timestamp::new(0))
            .unwrap();
        let record = engine
            .record_sale(&controller, token, price, Timestamp::new(1))
            .unwrap();

        let charity = engine.payout_balance(&addr("charity"));
        let seller = engine.payout_balance(&addr("seller"));
        prop_assert_eq!(charity + seller, price);
        prop_assert_eq!(record.royalty, charity);
        prop_assert!(record.royalty <= price / 10 + 1);
    }

    /// The royalty never exceeds the configured percentage of the price.
    #[test]
    fn royalty_is_floored_percentage(price in 1u128..10_000, percent in 0u128..=100) {
        let controller = addr("c0");
        let state = Arc::new(LedgerState::with_controller(controller.clone()));
        let params = RewardParams {
            charity_royalty_percent: percent,
            ..RewardParams::default()
        };
        let mut engine = AchievementEngine::new(state, params, addr("charity"));

        let token = engine
            .mint(&controller, &addr("seller"), 0, "ref", Timestamp::new(0))
            .unwrap();
        let record = engine
            .record_sale(&controller, token, price, Timestamp::new(1))
            .unwrap();

        prop_assert_eq!(record.royalty, price * percent / 100);
        prop_assert!(record.royalty * 100 <= price * percent);
    }
}
