//! Caller roles for ledger mutation gating.

use serde::{Deserialize, Serialize};

/// The capability level of a ledger caller.
///
/// Roles are totally ordered: `Controller` can do everything `Minter` can,
/// `Minter` everything `Unprivileged` can.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// An ordinary authenticated wallet with no mint or admin rights.
    Unprivileged,
    /// May mint rewards on behalf of verified off-chain events.
    Minter,
    /// May mint, pause/unpause the ledgers, grant roles, and mint achievements.
    Controller,
}

impl Role {
    fn rank(self) -> u8 {
        match self {
            Self::Unprivileged => 0,
            Self::Minter => 1,
            Self::Controller => 2,
        }
    }

    /// Whether this role grants at least the capabilities of `required`.
    pub fn satisfies(self, required: Role) -> bool {
        self.rank() >= required.rank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_total() {
        assert!(Role::Controller.satisfies(Role::Minter));
        assert!(Role::Controller.satisfies(Role::Controller));
        assert!(Role::Minter.satisfies(Role::Unprivileged));
        assert!(!Role::Minter.satisfies(Role::Controller));
        assert!(!Role::Unprivileged.satisfies(Role::Minter));
    }
}
