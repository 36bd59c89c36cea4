//! Achievement and sale record types.

use salus_types::{Timestamp, WalletAddress};
use serde::{Deserialize, Serialize};

/// A unique achievement token. Immutable once minted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Achievement {
    /// Unique, monotonically assigned id.
    pub token_id: u64,
    /// Achievement kind tag (e.g. streak milestones, screening completions).
    pub kind: u16,
    /// The wallet the achievement was minted to.
    pub recipient: WalletAddress,
    /// Opaque reference to external metadata (resolved by a collaborator).
    pub metadata_ref: String,
    pub minted_at: Timestamp,
}

/// One recorded sale of an achievement token.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SaleRecord {
    pub token_id: u64,
    pub price: u128,
    /// The charity's cut, computed at the moment of sale.
    pub royalty: u128,
    pub timestamp: Timestamp,
}
