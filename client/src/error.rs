//! Client error taxonomy.
//!
//! `Clone` because in-flight results are shared between every caller that
//! joined the same operation.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The user declined the wallet prompt. Retrying without user action
    /// would just re-prompt them — callers must wait for a new gesture.
    #[error("user rejected the wallet request")]
    UserRejected,

    /// No wallet agent is installed or it is not responding.
    #[error("wallet agent unavailable: {0}")]
    AgentUnavailable(String),

    /// A transient network failure talking to the backend.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The backend rejected the request; carries the machine-readable
    /// reason code (e.g. `expired_nonce`, `invalid_signature`).
    #[error("authentication rejected: {0}")]
    Api(String),
}

impl ClientError {
    /// Whether an immediate retry can succeed without new user action.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Api(code) => code == "expired_nonce",
            Self::UserRejected | Self::AgentUnavailable(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_is_not_retryable_but_transport_is() {
        assert!(!ClientError::UserRejected.is_retryable());
        assert!(ClientError::Transport("timeout".into()).is_retryable());
        assert!(ClientError::Api("expired_nonce".into()).is_retryable());
        assert!(!ClientError::Api("invalid_signature".into()).is_retryable());
    }
}
