//! Wallet address derivation from public keys.
//!
//! Address format: `sal_` + hex(public_key, 64 chars) + hex(checksum, 8 chars).
//!
//! Checksum: first 4 bytes of Blake2b-256(public_key). Total length:
//! 4 (prefix) + 64 + 8 = 76 characters. The address embeds the full public
//! key, so signature verification can decode the expected signer directly
//! from the claimed address.

use salus_types::{PublicKey, WalletAddress};

/// Prefix for all Salus addresses.
const PREFIX: &str = "sal_";
/// Hex characters for the public key (32 bytes).
const PUBKEY_CHARS: usize = 64;
/// Hex characters for the checksum (4 bytes).
const CHECKSUM_CHARS: usize = 8;

/// Derive a `sal_`-prefixed wallet address from a public key.
pub fn derive_address(public_key: &PublicKey) -> WalletAddress {
    let checksum = &crate::blake2b_256(public_key.as_bytes())[..CHECKSUM_CHARS / 2];
    let address = format!(
        "{}{}{}",
        PREFIX,
        hex::encode(public_key.as_bytes()),
        hex::encode(checksum)
    );
    WalletAddress::new(address)
}

/// Extract the public key from a valid Salus address.
///
/// Returns `None` if the address is malformed or its checksum does not
/// match the embedded key.
pub fn decode_address(address: &str) -> Option<PublicKey> {
    let encoded = address.strip_prefix(PREFIX)?;
    if encoded.len() != PUBKEY_CHARS + CHECKSUM_CHARS {
        return None;
    }

    let (pubkey_hex, checksum_hex) = encoded.split_at(PUBKEY_CHARS);
    let pubkey_bytes: [u8; 32] = hex::decode(pubkey_hex).ok()?.try_into().ok()?;
    let checksum_bytes: [u8; 4] = hex::decode(checksum_hex).ok()?.try_into().ok()?;

    let expected = &crate::blake2b_256(&pubkey_bytes)[..4];
    if checksum_bytes != *expected {
        return None;
    }

    Some(PublicKey(pubkey_bytes))
}

/// Validate that an address string is well-formed with a correct checksum.
pub fn validate_address(address: &str) -> bool {
    decode_address(address).is_some()
}
