//! Authentication error taxonomy.
//!
//! Every failure path returns a distinct reason so callers can decide
//! whether to retry (expired nonce → re-issue and retry) or hard-fail
//! (invalid signature → abort). Failures are never defaulted to "new user".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("challenge nonce has expired")]
    ExpiredNonce,

    #[error("challenge nonce already consumed or never issued")]
    ReplayedNonce,

    #[error("signature does not match the claimed address")]
    InvalidSignature,

    #[error("invalid wallet address: {0}")]
    InvalidAddress(String),

    #[error("challenge message is malformed")]
    MalformedChallenge,

    #[error("too many outstanding challenges")]
    ChallengeCapacity,

    #[error("identity has been deactivated")]
    IdentityDeactivated,

    #[error("unknown session token")]
    SessionUnknown,

    #[error("session has expired")]
    SessionExpired,

    #[error("storage error: {0}")]
    Store(#[from] salus_store::StoreError),
}
