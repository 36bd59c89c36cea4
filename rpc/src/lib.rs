//! HTTP API for the Salus protocol.
//!
//! Exposes the authentication endpoints (challenge, verify) and the
//! role-gated ledger operations over axum. The caller's role is resolved
//! from the bearer session, never re-derived from the raw address.

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod server;

pub use config::ServiceConfig;
pub use error::RpcError;
pub use metrics::ServiceMetrics;
pub use server::{build_router, AppState, RpcServer};
