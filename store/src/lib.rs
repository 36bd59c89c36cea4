//! Abstract storage traits for identity and session persistence.
//!
//! The authentication path depends only on these traits; any backend
//! (SQL, KV store, in-memory for testing) can implement them. The ledger
//! engines own their rows directly and do not go through this crate.

pub mod error;
pub mod identity;
pub mod memory;
pub mod session;

pub use error::StoreError;
pub use identity::{IdentityStore, WalletIdentity};
pub use memory::{MemoryIdentityStore, MemorySessionStore};
pub use session::{Session, SessionStore};
