//! Core error types for brewtrace-core.
//!
//! Uses `thiserror` for structured, matchable error variants. The entity
//! model itself has few failure modes; most errors in the SDK originate at
//! the ledger boundary and are defined there.

use thiserror::Error;

use crate::id::{LineId, TradeId};

/// Core errors produced by the brewtrace-core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A trade-type lookup returned a code outside the known variant set.
    #[error("invalid trade type code: {code}")]
    InvalidTradeType { code: u8 },

    /// A line ID was not found within its parent trade.
    #[error("line not found: trade={trade}, line={line}")]
    LineNotFound { trade: TradeId, line: LineId },
}
