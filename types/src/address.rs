//! Wallet address type with `sal_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Salus wallet address, always prefixed with `sal_`.
///
/// Encodes the wallet's Ed25519 public key in hex plus a Blake2b checksum.
/// Use `salus_crypto::derive_address` to construct one from a public key and
/// `salus_crypto::decode_address` to recover the key bytes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// The standard prefix for all Salus wallet addresses.
    pub const PREFIX: &'static str = "sal_";

    /// Wrap a raw address string without validating the checksum.
    ///
    /// # Panics
    /// Panics if the string does not start with `sal_`. Checksum validation
    /// is the crypto crate's job.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "address must start with sal_");
        Self(s)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Cheap structural check (prefix and non-empty body).
    pub fn is_well_formed(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WalletAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_prefixed() {
        let addr = WalletAddress::new("sal_abc123");
        assert_eq!(addr.as_str(), "sal_abc123");
        assert!(addr.is_well_formed());
    }

    #[test]
    #[should_panic]
    fn new_rejects_foreign_prefix() {
        WalletAddress::new("eth_abc123");
    }

    #[test]
    fn bare_prefix_is_not_well_formed() {
        let addr = WalletAddress::new("sal_");
        assert!(!addr.is_well_formed());
    }

    #[test]
    fn display_matches_raw() {
        let addr = WalletAddress::new("sal_00ff");
        assert_eq!(format!("{addr}"), "sal_00ff");
    }
}
