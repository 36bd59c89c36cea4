//! In-memory storage backends.
//!
//! The reference deployment keeps identities and sessions in process
//! memory; persistent backends implement the same traits.

use std::collections::HashMap;

use crate::identity::{IdentityStore, WalletIdentity};
use crate::session::{Session, SessionStore};
use crate::StoreError;
use salus_types::{Timestamp, WalletAddress};

/// In-memory identity store with monotonic id assignment.
#[derive(Default)]
pub struct MemoryIdentityStore {
    by_address: HashMap<WalletAddress, WalletIdentity>,
    next_id: u64,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn get_by_address(&self, address: &WalletAddress) -> Result<Option<WalletIdentity>, StoreError> {
        Ok(self.by_address.get(address).cloned())
    }

    fn insert(
        &mut self,
        address: &WalletAddress,
        created_at: Timestamp,
    ) -> Result<WalletIdentity, StoreError> {
        if self.by_address.contains_key(address) {
            return Err(StoreError::Duplicate(address.to_string()));
        }
        let identity = WalletIdentity {
            id: self.next_id,
            address: address.clone(),
            created_at,
            active: true,
        };
        self.next_id += 1;
        self.by_address.insert(address.clone(), identity.clone());
        Ok(identity)
    }

    fn deactivate(&mut self, address: &WalletAddress) -> Result<(), StoreError> {
        match self.by_address.get_mut(address) {
            Some(identity) => {
                identity.active = false;
                Ok(())
            }
            None => Err(StoreError::NotFound(address.to_string())),
        }
    }

    fn identity_count(&self) -> Result<u64, StoreError> {
        Ok(self.by_address.len() as u64)
    }
}

/// In-memory session store keyed by bearer token.
#[derive(Default)]
pub struct MemorySessionStore {
    by_token: HashMap<String, Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn put(&mut self, session: Session) -> Result<(), StoreError> {
        self.by_token.insert(session.token.clone(), session);
        Ok(())
    }

    fn get(&self, token: &str) -> Result<Option<Session>, StoreError> {
        Ok(self.by_token.get(token).cloned())
    }

    fn purge_expired(&mut self, now: Timestamp) -> Result<u64, StoreError> {
        let before = self.by_token.len();
        self.by_token.retain(|_, s| !s.is_expired(now));
        Ok((before - self.by_token.len()) as u64)
    }

    fn session_count(&self) -> Result<u64, StoreError> {
        Ok(self.by_token.len() as u64)
    }
}
