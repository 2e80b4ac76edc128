//! The [`OperationRegistry`] and [`TradeLedger`] traits defining the read
//! contract against the external contracts and canisters.
//!
//! Every method is async: a call is a suspension point that goes out to an
//! already-authenticated remote client. Authentication, request signing and
//! transaction submission are entirely the remote client's concern; these
//! traits only ever read.
//!
//! All backends (remote clients, [`InMemoryLedger`](crate::memory::InMemoryLedger),
//! the [`Retry`](crate::retry::Retry) decorator) implement these traits, so
//! the graph layer is swappable across them without changing its logic.

use async_trait::async_trait;

use brewtrace_core::{Address, BasicTrade, Line, MaterialId, Operation, OrderTrade, TradeId};

use crate::error::LedgerError;

/// Read access to the processing-operation registry.
///
/// Operations are indexed per creator scope; there is no global query. The
/// registry's upstream invariant is at most one operation per output
/// material within one scope -- the graph layer treats violations as an
/// anomaly rather than picking a winner.
#[async_trait]
pub trait OperationRegistry: Send + Sync {
    /// All operations under `actor` whose output material is `material`.
    async fn operations_by_output_material(
        &self,
        material: MaterialId,
        actor: &Address,
    ) -> Result<Vec<Operation>, LedgerError>;

    /// All operations recorded by `actor`.
    async fn operations_by_creator(&self, actor: &Address) -> Result<Vec<Operation>, LedgerError>;
}

/// Read access to a supplier's trade registry.
///
/// Trades are scoped to a supplier address. The registry stores a raw type
/// code per trade; parsing it into a [`TradeType`](brewtrace_core::TradeType)
/// (and rejecting unknown codes) happens on the caller's side, next to the
/// variant-specific fetch it gates.
#[async_trait]
pub trait TradeLedger: Send + Sync {
    /// The ids of every trade under `supplier`, in registry insertion order.
    async fn trade_ids(&self, supplier: &Address) -> Result<Vec<TradeId>, LedgerError>;

    /// The raw on-chain type code of one trade.
    async fn trade_type_code(
        &self,
        supplier: &Address,
        trade: TradeId,
    ) -> Result<u8, LedgerError>;

    /// The line items of one trade, in recorded order.
    async fn trade_lines(
        &self,
        supplier: &Address,
        trade: TradeId,
    ) -> Result<Vec<Line>, LedgerError>;

    /// The full record of a basic trade.
    async fn basic_trade(
        &self,
        supplier: &Address,
        trade: TradeId,
    ) -> Result<BasicTrade, LedgerError>;

    /// The full record of an order trade.
    async fn order_trade(
        &self,
        supplier: &Address,
        trade: TradeId,
    ) -> Result<OrderTrade, LedgerError>;
}
