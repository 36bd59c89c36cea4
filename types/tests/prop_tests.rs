use proptest::prelude::*;

use salus_types::{CreditAmount, Timestamp};
use salus_types::time::SECS_PER_DAY;

proptest! {
    /// CreditAmount ordering mirrors raw u128 ordering.
    #[test]
    fn amount_ordering(a in 0u128..u128::MAX, b in 0u128..u128::MAX) {
        let ca = CreditAmount::new(a);
        let cb = CreditAmount::new(b);
        prop_assert_eq!(ca <= cb, a <= b);
        prop_assert_eq!(ca == cb, a == b);
    }

    /// saturating_add never decreases a balance.
    #[test]
    fn amount_saturating_add_monotone(a in 0u128..u128::MAX, b in 0u128..u128::MAX) {
        let sum = CreditAmount::new(a).saturating_add(CreditAmount::new(b));
        prop_assert!(sum >= CreditAmount::new(a));
    }

    /// Timestamps within the same day share a day number; timestamps a full
    /// day apart never do.
    #[test]
    fn day_number_partitions(secs in 0u64..(u64::MAX - SECS_PER_DAY)) {
        let t = Timestamp::new(secs);
        let same_day = Timestamp::new(secs - (secs % SECS_PER_DAY));
        let next_day = Timestamp::new(secs + SECS_PER_DAY);
        prop_assert_eq!(t.day_number(), same_day.day_number());
        prop_assert_eq!(t.day_number() + 1, next_day.day_number());
    }

    /// has_expired agrees with manual arithmetic.
    #[test]
    fn has_expired_matches_arithmetic(
        issued in 0u64..1_000_000_000,
        ttl in 0u64..1_000_000,
        now in 0u64..2_000_000_000,
    ) {
        let t = Timestamp::new(issued);
        prop_assert_eq!(t.has_expired(ttl, Timestamp::new(now)), now >= issued + ttl);
    }
}
