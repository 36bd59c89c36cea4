//! Backend authentication API.
//!
//! The trait is what the orchestrator depends on; [`HttpAuthApi`] is the
//! production implementation over the Salus RPC endpoints.

use std::time::Duration;

use async_trait::async_trait;
use salus_types::{Signature, WalletAddress};
use serde::Deserialize;

use crate::error::ClientError;

/// A freshly issued challenge from the backend.
#[derive(Clone, Debug, Deserialize)]
pub struct ChallengeResponse {
    pub message: String,
    pub nonce: String,
}

/// The authenticated session returned by a successful verification.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthSession {
    pub user_id: u64,
    pub address: WalletAddress,
    pub access_token: String,
    pub is_new_user: bool,
}

/// Backend endpoints the client needs for the challenge → verify sequence.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn issue_challenge(
        &self,
        address: &WalletAddress,
    ) -> Result<ChallengeResponse, ClientError>;

    async fn verify(
        &self,
        address: &WalletAddress,
        signature: &Signature,
        message: &str,
    ) -> Result<AuthSession, ClientError>;
}

// ── HTTP implementation ─────────────────────────────────────────────────

/// HTTP client for the Salus authentication endpoints.
pub struct HttpAuthApi {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct VerifyBody {
    user: UserBody,
    access_token: String,
    is_new_user: bool,
}

#[derive(Deserialize)]
struct UserBody {
    id: u64,
    address: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    reason: String,
}

impl HttpAuthApi {
    /// Create a client targeting the given base URL
    /// (e.g. `http://127.0.0.1:7140`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, ClientError> {
        let response = self
            .http
            .post(format!("{}{path}", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("request failed: {e}")))?;

        let status = response.status();
        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ClientError::Transport(format!("invalid JSON response: {e}")))?;

        if status.is_success() {
            return Ok(json);
        }
        // 4xx carries a machine-readable reason; anything else is transport.
        if status.is_client_error() {
            let reason = serde_json::from_value::<ErrorBody>(json)
                .map(|e| e.reason)
                .unwrap_or_else(|_| status.to_string());
            return Err(ClientError::Api(reason));
        }
        Err(ClientError::Transport(format!("server returned {status}")))
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn issue_challenge(
        &self,
        address: &WalletAddress,
    ) -> Result<ChallengeResponse, ClientError> {
        let json = self
            .post_json(
                "/auth/challenge",
                serde_json::json!({ "address": address.as_str() }),
            )
            .await?;
        serde_json::from_value(json)
            .map_err(|e| ClientError::Transport(format!("invalid challenge response: {e}")))
    }

    async fn verify(
        &self,
        address: &WalletAddress,
        signature: &Signature,
        message: &str,
    ) -> Result<AuthSession, ClientError> {
        let json = self
            .post_json(
                "/auth/verify",
                serde_json::json!({
                    "address": address.as_str(),
                    "signature": signature,
                    "message": message,
                }),
            )
            .await?;
        let body: VerifyBody = serde_json::from_value(json)
            .map_err(|e| ClientError::Transport(format!("invalid verify response: {e}")))?;
        Ok(AuthSession {
            user_id: body.user.id,
            address: WalletAddress::new(body.user.address),
            access_token: body.access_token,
            is_new_user: body.is_new_user,
        })
    }
}
