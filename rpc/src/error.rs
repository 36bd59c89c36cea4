//! RPC error types and their HTTP mapping.
//!
//! Every authentication or ledger failure surfaces as a 4xx with a
//! machine-readable `reason` code so clients can decide between retrying
//! (e.g. `expired_nonce`) and hard-failing (e.g. `invalid_signature`).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use salus_auth::AuthError;
use salus_ledger::LedgerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("missing or malformed authorization header")]
    MissingBearer,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("server error: {0}")]
    Server(String),
}

impl RpcError {
    /// The machine-readable reason code returned to clients.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Auth(AuthError::ExpiredNonce) => "expired_nonce",
            Self::Auth(AuthError::ReplayedNonce) => "replayed_nonce",
            Self::Auth(AuthError::InvalidSignature) => "invalid_signature",
            Self::Auth(AuthError::InvalidAddress(_)) => "invalid_address",
            Self::Auth(AuthError::MalformedChallenge) => "malformed_challenge",
            Self::Auth(AuthError::ChallengeCapacity) => "challenge_capacity",
            Self::Auth(AuthError::IdentityDeactivated) => "identity_deactivated",
            Self::Auth(AuthError::SessionUnknown) => "invalid_session",
            Self::Auth(AuthError::SessionExpired) => "session_expired",
            Self::Auth(AuthError::Store(_)) => "storage",
            Self::Ledger(LedgerError::Paused) => "paused",
            Self::Ledger(LedgerError::AlreadyRewardedToday) => "already_rewarded_today",
            Self::Ledger(LedgerError::UnauthorizedMint(_)) => "unauthorized_mint",
            Self::Ledger(LedgerError::InsufficientRole(_)) => "insufficient_role",
            Self::Ledger(LedgerError::UnknownToken(_)) => "unknown_token",
            Self::InvalidRequest(_) => "invalid_request",
            Self::MissingBearer => "missing_bearer",
            Self::Config(_) => "config",
            Self::Server(_) => "server",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Auth(AuthError::ExpiredNonce)
            | Self::Auth(AuthError::ReplayedNonce)
            | Self::Auth(AuthError::InvalidSignature)
            | Self::Auth(AuthError::SessionUnknown)
            | Self::Auth(AuthError::SessionExpired) => StatusCode::UNAUTHORIZED,
            Self::Auth(AuthError::IdentityDeactivated) => StatusCode::FORBIDDEN,
            Self::Auth(AuthError::ChallengeCapacity) => StatusCode::TOO_MANY_REQUESTS,
            Self::Auth(AuthError::InvalidAddress(_))
            | Self::Auth(AuthError::MalformedChallenge)
            | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Auth(AuthError::Store(_)) | Self::Config(_) | Self::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Ledger(LedgerError::Paused)
            | Self::Ledger(LedgerError::AlreadyRewardedToday) => StatusCode::CONFLICT,
            Self::Ledger(LedgerError::UnauthorizedMint(_))
            | Self::Ledger(LedgerError::InsufficientRole(_)) => StatusCode::FORBIDDEN,
            Self::Ledger(LedgerError::UnknownToken(_)) => StatusCode::NOT_FOUND,
            Self::MissingBearer => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "reason": self.reason(),
            "detail": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}
