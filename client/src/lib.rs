//! Client-side connection orchestration.
//!
//! External wallet agents prompt the user on every request and can silently
//! drop one (the user closes the popup, no callback fires). The
//! [`ConnectionOrchestrator`] therefore collapses overlapping `connect` /
//! `authenticate` calls into one in-flight operation per kind — every
//! caller joins the pending future and observes the same result — and
//! exposes an explicit `reset` escape hatch for stuck flows.

pub mod agent;
pub mod api;
pub mod error;
pub mod orchestrator;

pub use agent::WalletAgent;
pub use api::{AuthApi, AuthSession, ChallengeResponse, HttpAuthApi};
pub use error::ClientError;
pub use orchestrator::{ConnectionOrchestrator, ConnectionPhase};
