//! Single-use challenge nonces, one unconsumed per address.
//!
//! The registry is the sole owner of nonce lifecycles. `consume` is a single
//! check-and-take under `&mut self` — two verification attempts racing on
//! the same nonce cannot both observe it valid, because the second runs
//! after the first has already removed the entry.

use std::collections::HashMap;

use salus_types::{Timestamp, WalletAddress};

use crate::error::AuthError;

/// A freshly issued challenge: the message to sign and its hex nonce.
#[derive(Clone, Debug)]
pub struct IssuedChallenge {
    pub message: String,
    pub nonce: String,
}

struct NonceEntry {
    value: [u8; 32],
    issued_at: Timestamp,
}

/// Issues and consumes single-use authentication challenges per address.
pub struct NonceRegistry {
    pending: HashMap<WalletAddress, NonceEntry>,
    /// Seconds an issued nonce stays valid.
    ttl_secs: u64,
    /// Cap on outstanding challenges (prevents memory exhaustion).
    max_pending: usize,
}

impl NonceRegistry {
    pub fn new(ttl_secs: u64, max_pending: usize) -> Self {
        Self {
            pending: HashMap::new(),
            ttl_secs,
            max_pending,
        }
    }

    /// Issue a fresh challenge for `address`, overwriting any prior
    /// unconsumed nonce for it.
    pub fn issue(
        &mut self,
        address: &WalletAddress,
        now: Timestamp,
    ) -> Result<IssuedChallenge, AuthError> {
        if self.pending.len() >= self.max_pending && !self.pending.contains_key(address) {
            self.evict_expired(now);
            if self.pending.len() >= self.max_pending {
                return Err(AuthError::ChallengeCapacity);
            }
        }

        let value: [u8; 32] = salus_crypto::random_bytes();
        let nonce = hex::encode(value);
        let message = build_message(address, &nonce);

        self.pending.insert(
            address.clone(),
            NonceEntry {
                value,
                issued_at: now,
            },
        );
        tracing::debug!(%address, "issued authentication challenge");

        Ok(IssuedChallenge { message, nonce })
    }

    /// Atomically check and consume the stored nonce for `address`.
    ///
    /// Missing or mismatched → `ReplayedNonce`; past its TTL →
    /// `ExpiredNonce`. A mismatched value does not destroy the stored
    /// entry, so garbage submissions cannot invalidate a victim's pending
    /// challenge.
    pub fn consume(
        &mut self,
        address: &WalletAddress,
        provided_hex: &str,
        now: Timestamp,
    ) -> Result<(), AuthError> {
        let entry = self.pending.get(address).ok_or(AuthError::ReplayedNonce)?;

        if entry.issued_at.has_expired(self.ttl_secs, now) {
            self.pending.remove(address);
            return Err(AuthError::ExpiredNonce);
        }

        let provided: [u8; 32] = hex::decode(provided_hex)
            .ok()
            .and_then(|v| v.try_into().ok())
            .ok_or(AuthError::ReplayedNonce)?;
        if provided != entry.value {
            return Err(AuthError::ReplayedNonce);
        }

        self.pending.remove(address);
        Ok(())
    }

    /// Number of outstanding challenges.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn evict_expired(&mut self, now: Timestamp) {
        let ttl = self.ttl_secs;
        self.pending
            .retain(|_, entry| !entry.issued_at.has_expired(ttl, now));
    }
}

/// Build the human-readable challenge message.
///
/// Embeds both the address and the nonce so a signature over this message
/// cannot be replayed for another address or another login attempt.
pub fn build_message(address: &WalletAddress, nonce_hex: &str) -> String {
    format!(
        "Salus sign-in request\n\nAddress: {address}\nNonce: {nonce_hex}\n\nSigning this message proves you control this wallet. It costs nothing."
    )
}

/// Parse the nonce back out of a challenge message.
pub fn extract_nonce(message: &str) -> Option<&str> {
    message
        .lines()
        .find_map(|line| line.strip_prefix("Nonce: "))
}
