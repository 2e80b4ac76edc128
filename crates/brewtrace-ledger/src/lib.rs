//! Read-only accessor boundary to the traceability platform's on-chain
//! records.
//!
//! The contracts and canisters that enforce ownership, signatures and escrow
//! live outside this workspace; this crate defines the narrow read surface
//! the SDK consumes from them, plus an in-memory backend for tests and
//! offline fixtures.
//!
//! # Modules
//!
//! - [`error`]: LedgerError enum with all failure modes
//! - [`traits`]: OperationRegistry and TradeLedger trait definitions
//! - [`memory`]: InMemoryLedger implementation
//! - [`retry`]: Retry decorator for transient remote failures

pub mod error;
pub mod memory;
pub mod retry;
pub mod traits;

// Re-export key types for ergonomic use.
pub use error::LedgerError;
pub use memory::InMemoryLedger;
pub use retry::Retry;
pub use traits::{OperationRegistry, TradeLedger};
