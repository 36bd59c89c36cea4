//! Health record and statistics types.

use salus_types::{ConditionTier, Timestamp};
use serde::{Deserialize, Serialize};

/// One reported condition. Immutable once written.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthRecord {
    pub tier: ConditionTier,
    /// Classifier confidence, 0–100. Stored and logged; does not scale the
    /// minted amount.
    pub confidence: u8,
    pub timestamp: Timestamp,
}

/// Per-address aggregate counts by tier.
///
/// Maintained incrementally alongside each history append — reads never
/// rescan the history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatistics {
    pub total_tests: u64,
    pub normal_count: u64,
    pub mild_count: u64,
    pub severe_count: u64,
}

impl HealthStatistics {
    pub(crate) fn record(&mut self, tier: ConditionTier) {
        self.total_tests += 1;
        match tier {
            ConditionTier::Normal => self.normal_count += 1,
            ConditionTier::Mild => self.mild_count += 1,
            ConditionTier::Severe => self.severe_count += 1,
        }
    }
}
