//! Ledger error types for brewtrace-ledger.
//!
//! [`LedgerError`] covers the failure modes of the accessor boundary:
//! transport failures from the remote clients, entity-not-found variants,
//! and variant mismatches on the type-specific trade accessors. Transport
//! failures are the only *transient* class; everything else is final.

use thiserror::Error;

use brewtrace_core::{Address, CoreError, TradeId, TradeType};

/// Errors produced by ledger accessors.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A transport or lookup failure from a remote accessor. Propagated
    /// unchanged up the call stack; retrying is the caller's decision (see
    /// [`crate::retry::Retry`]).
    #[error("remote accessor failure: {reason}")]
    Remote { reason: String },

    /// A trade ID was not found under the given supplier scope.
    #[error("trade not found: supplier={supplier}, trade={trade}")]
    TradeNotFound { supplier: Address, trade: TradeId },

    /// A variant-specific accessor was asked for the wrong variant.
    #[error("trade {trade} under {supplier} is not a {expected} trade")]
    VariantMismatch {
        supplier: Address,
        trade: TradeId,
        expected: TradeType,
    },

    /// A core entity error surfaced through a lookup (e.g. an unknown
    /// trade-type code).
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl LedgerError {
    /// Shorthand for a transport failure.
    pub fn remote(reason: impl Into<String>) -> Self {
        LedgerError::Remote {
            reason: reason.into(),
        }
    }

    /// True for failures worth retrying (transport only). Not-found and
    /// invalid-type answers are authoritative and never retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, LedgerError::Remote { .. })
    }
}
