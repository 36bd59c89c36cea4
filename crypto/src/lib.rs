//! Cryptographic primitives for the Salus protocol.
//!
//! Ed25519 key generation and signing, Blake2b hashing, and wallet address
//! derivation. Authentication never recovers a signer from a signature —
//! the address itself encodes the public key, and verification checks the
//! signature against that key.

pub mod address;
pub mod keys;
pub mod sign;

pub use address::{decode_address, derive_address, validate_address};
pub use keys::{generate_keypair, keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{sign_message, verify_signature};

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

/// Compute the Blake2b-256 hash of arbitrary bytes.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b::<U32>::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Fill a buffer with OS-grade randomness (nonces, session tokens).
pub fn random_bytes<const N: usize>() -> [u8; N] {
    let mut buf = [0u8; N];
    getrandom::getrandom(&mut buf).expect("OS randomness unavailable");
    buf
}
