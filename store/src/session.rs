//! Session storage trait.

use crate::StoreError;
use salus_types::{Timestamp, WalletAddress};
use serde::{Deserialize, Serialize};

/// An authenticated session, traceable to exactly one successful
/// challenge verification.
///
/// Sessions expire by time; this core has no explicit revocation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token (hex of 32 random bytes).
    pub token: String,
    /// The identity this session was issued to.
    pub identity_id: u64,
    /// The authenticated wallet address.
    pub address: WalletAddress,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
}

impl Session {
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

/// Trait for session storage operations.
pub trait SessionStore {
    fn put(&mut self, session: Session) -> Result<(), StoreError>;

    fn get(&self, token: &str) -> Result<Option<Session>, StoreError>;

    /// Drop all sessions past their expiry. Returns how many were removed.
    fn purge_expired(&mut self, now: Timestamp) -> Result<u64, StoreError>;

    fn session_count(&self) -> Result<u64, StoreError>;
}
