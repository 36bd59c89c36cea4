//! The external wallet agent interface.

use async_trait::async_trait;
use salus_types::{Signature, WalletAddress};

use crate::error::ClientError;

/// A browser-extension or hardware wallet the orchestrator talks to.
///
/// Every method may prompt the user; implementations surface a declined
/// prompt as [`ClientError::UserRejected`] so callers can distinguish it
/// from transient failures.
#[async_trait]
pub trait WalletAgent: Send + Sync {
    /// Request a connection, prompting the user if needed.
    async fn connect(&self) -> Result<WalletAddress, ClientError>;

    /// The currently connected address, if any. Never prompts.
    async fn current_address(&self) -> Option<WalletAddress>;

    /// Ask the wallet to sign a message with the connected account's key.
    async fn sign_message(&self, message: &str) -> Result<Signature, ClientError>;
}
