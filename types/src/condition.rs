//! Severity tiers for reported health conditions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A discrete classification of a reported health condition.
///
/// Reward eligibility decreases with severity; `Severe` findings mint
/// nothing so a medically urgent signal never carries an incentive to game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionTier {
    Normal,
    Mild,
    Severe,
}

impl fmt::Display for ConditionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Normal => "normal",
            Self::Mild => "mild",
            Self::Severe => "severe",
        };
        write!(f, "{s}")
    }
}
