//! Wallet identity storage trait.

use crate::StoreError;
use salus_types::{Timestamp, WalletAddress};
use serde::{Deserialize, Serialize};

/// A persisted wallet identity.
///
/// Created lazily on the first successful challenge verification for an
/// address — there is no separate registration path. Identities are never
/// deleted, only deactivated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WalletIdentity {
    /// Monotonically assigned profile id.
    pub id: u64,
    /// The wallet address; unique key.
    pub address: WalletAddress,
    /// When the identity was first created.
    pub created_at: Timestamp,
    /// Cleared on deactivation; deactivated identities cannot authenticate.
    pub active: bool,
}

/// Trait for wallet identity storage operations.
pub trait IdentityStore {
    fn get_by_address(&self, address: &WalletAddress) -> Result<Option<WalletIdentity>, StoreError>;

    /// Insert a new identity for `address`, assigning the next profile id.
    /// Fails with `Duplicate` if the address already has one.
    fn insert(
        &mut self,
        address: &WalletAddress,
        created_at: Timestamp,
    ) -> Result<WalletIdentity, StoreError>;

    /// Mark an identity inactive. Fails with `NotFound` for unknown addresses.
    fn deactivate(&mut self, address: &WalletAddress) -> Result<(), StoreError>;

    fn identity_count(&self) -> Result<u64, StoreError>;
}
