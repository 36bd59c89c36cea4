//! Challenge-response wallet authentication.
//!
//! A wallet proves control of its address by signing a server-issued,
//! single-use nonce. The flow:
//!
//! 1. Client requests a challenge for its address → [`NonceRegistry::issue`]
//! 2. Wallet signs the returned message
//! 3. Client submits `(address, signature, message)` → [`Authenticator::verify`]
//!
//! Verification checks the signature against the public key embedded in the
//! address, consumes the nonce atomically (closing the double-redeem race),
//! creates the wallet identity on first contact, and issues a session.
//! There is no separate registration path.

pub mod authenticator;
pub mod error;
pub mod nonce;

pub use authenticator::{Authenticator, VerifiedSession};
pub use error::AuthError;
pub use nonce::{IssuedChallenge, NonceRegistry};
