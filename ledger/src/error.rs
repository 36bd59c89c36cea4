//! Ledger mutation error taxonomy.
//!
//! Every failure leaves ledger state unchanged — engines return one of
//! these before their first write.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger is paused")]
    Paused,

    #[error("exercise reward already claimed today")]
    AlreadyRewardedToday,

    #[error("caller {0} lacks the role required to mint")]
    UnauthorizedMint(String),

    #[error("caller {0} lacks the controller role")]
    InsufficientRole(String),

    #[error("unknown achievement token: {0}")]
    UnknownToken(u64),
}
