//! Resolver error types for brewtrace-graph.
//!
//! Everything the ledger boundary can fail with flows through unchanged
//! (fail-fast, no partial-result salvage); the resolver adds one structural
//! anomaly of its own.

use thiserror::Error;

use brewtrace_core::{MaterialId, OperationId};
use brewtrace_ledger::LedgerError;

/// Errors produced while resolving a provenance graph.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// An accessor failure, propagated unchanged from the ledger boundary.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// More than one operation claims the same output material within one
    /// actor scope. The registry invariant says this cannot happen; when it
    /// does, the resolver reports the competing operations instead of
    /// silently picking one.
    #[error(
        "ambiguous provenance: {count} operations claim output material {material}",
        count = operations.len()
    )]
    AmbiguousProvenance {
        material: MaterialId,
        operations: Vec<OperationId>,
    },
}
