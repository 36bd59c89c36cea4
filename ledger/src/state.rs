//! Global pause flag and role assignments.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use salus_types::{Role, WalletAddress};

use crate::error::LedgerError;

/// Shared mutable ledger state.
///
/// The pause flag gates every mutating operation on the fungible and
/// achievement ledgers. Interior mutability lets both engines hold the same
/// `Arc<LedgerState>` and read it without cross-engine locking; writes go
/// through the controller-gated methods only.
pub struct LedgerState {
    paused: AtomicBool,
    roles: RwLock<HashMap<WalletAddress, Role>>,
}

impl LedgerState {
    pub fn new() -> Self {
        Self {
            paused: AtomicBool::new(false),
            roles: RwLock::new(HashMap::new()),
        }
    }

    /// Bootstrap with an initial controller — without one, no role could
    /// ever be granted.
    pub fn with_controller(controller: WalletAddress) -> Self {
        let state = Self::new();
        state
            .roles
            .write()
            .unwrap()
            .insert(controller, Role::Controller);
        state
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Every mint checks this first and fails fast when paused.
    pub fn ensure_unpaused(&self) -> Result<(), LedgerError> {
        if self.is_paused() {
            return Err(LedgerError::Paused);
        }
        Ok(())
    }

    /// The role assigned to an address, `Unprivileged` by default.
    pub fn role_of(&self, address: &WalletAddress) -> Role {
        self.roles
            .read()
            .unwrap()
            .get(address)
            .copied()
            .unwrap_or(Role::Unprivileged)
    }

    /// Check that `caller` may mint at the `required` capability level.
    pub fn ensure_can_mint(
        &self,
        caller: &WalletAddress,
        required: Role,
    ) -> Result<(), LedgerError> {
        if !self.role_of(caller).satisfies(required) {
            return Err(LedgerError::UnauthorizedMint(caller.to_string()));
        }
        Ok(())
    }

    fn ensure_controller(&self, caller: &WalletAddress) -> Result<(), LedgerError> {
        if !self.role_of(caller).satisfies(Role::Controller) {
            return Err(LedgerError::InsufficientRole(caller.to_string()));
        }
        Ok(())
    }

    /// Halt all mutating operations on the gated ledgers.
    pub fn pause(&self, caller: &WalletAddress) -> Result<(), LedgerError> {
        self.ensure_controller(caller)?;
        self.paused.store(true, Ordering::SeqCst);
        tracing::warn!(%caller, "ledgers paused");
        Ok(())
    }

    /// Resume normal operation. Balances are untouched by a pause cycle.
    pub fn unpause(&self, caller: &WalletAddress) -> Result<(), LedgerError> {
        self.ensure_controller(caller)?;
        self.paused.store(false, Ordering::SeqCst);
        tracing::info!(%caller, "ledgers unpaused");
        Ok(())
    }

    /// Assign a role to an address. Controller only.
    pub fn grant_role(
        &self,
        caller: &WalletAddress,
        target: WalletAddress,
        role: Role,
    ) -> Result<(), LedgerError> {
        self.ensure_controller(caller)?;
        tracing::info!(%caller, %target, ?role, "role granted");
        self.roles.write().unwrap().insert(target, role);
        Ok(())
    }
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(tag: &str) -> WalletAddress {
        WalletAddress::new(format!("sal_{tag}"))
    }

    #[test]
    fn starts_unpaused_with_no_roles() {
        let state = LedgerState::new();
        assert!(!state.is_paused());
        assert_eq!(state.role_of(&addr("aa")), Role::Unprivileged);
    }

    #[test]
    fn controller_can_pause_and_unpause() {
        let controller = addr("c0");
        let state = LedgerState::with_controller(controller.clone());

        state.pause(&controller).unwrap();
        assert!(state.is_paused());
        assert!(matches!(state.ensure_unpaused(), Err(LedgerError::Paused)));

        state.unpause(&controller).unwrap();
        assert!(!state.is_paused());
        state.ensure_unpaused().unwrap();
    }

    #[test]
    fn minter_cannot_pause() {
        let controller = addr("c0");
        let minter = addr("m0");
        let state = LedgerState::with_controller(controller.clone());
        state
            .grant_role(&controller, minter.clone(), Role::Minter)
            .unwrap();

        assert!(matches!(
            state.pause(&minter),
            Err(LedgerError::InsufficientRole(_))
        ));
    }

    #[test]
    fn grant_requires_controller() {
        let state = LedgerState::new();
        assert!(matches!(
            state.grant_role(&addr("aa"), addr("bb"), Role::Minter),
            Err(LedgerError::InsufficientRole(_))
        ));
    }

    #[test]
    fn mint_capability_checks() {
        let controller = addr("c0");
        let minter = addr("m0");
        let state = LedgerState::with_controller(controller.clone());
        state
            .grant_role(&controller, minter.clone(), Role::Minter)
            .unwrap();

        state.ensure_can_mint(&minter, Role::Minter).unwrap();
        state.ensure_can_mint(&controller, Role::Minter).unwrap();
        state.ensure_can_mint(&controller, Role::Controller).unwrap();
        assert!(matches!(
            state.ensure_can_mint(&minter, Role::Controller),
            Err(LedgerError::UnauthorizedMint(_))
        ));
        assert!(matches!(
            state.ensure_can_mint(&addr("aa"), Role::Minter),
            Err(LedgerError::UnauthorizedMint(_))
        ));
    }
}
