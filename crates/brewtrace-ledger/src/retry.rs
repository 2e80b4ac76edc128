//! Retry decorator for transient remote failures.
//!
//! [`Retry`] wraps any accessor backend and re-issues calls that failed with
//! a transient error ([`LedgerError::is_transient`]), sleeping a fixed delay
//! between attempts. Final errors (not-found, invalid type, variant
//! mismatch) pass through on first occurrence.
//!
//! The decorator sits strictly at the accessor boundary: the graph layer
//! above it stays fail-fast and never retries on its own.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use brewtrace_core::{Address, BasicTrade, Line, MaterialId, Operation, OrderTrade, TradeId};

use crate::error::LedgerError;
use crate::traits::{OperationRegistry, TradeLedger};

/// Wraps a ledger backend with bounded retries on transient failures.
pub struct Retry<L> {
    inner: L,
    max_attempts: u32,
    delay: Duration,
}

impl<L> Retry<L> {
    /// Wraps `inner` with the default policy: 3 attempts, 200ms apart.
    pub fn new(inner: L) -> Self {
        Retry::with_policy(inner, 3, Duration::from_millis(200))
    }

    /// Wraps `inner` with an explicit policy. `max_attempts` counts the
    /// initial call, so `1` disables retrying entirely.
    pub fn with_policy(inner: L, max_attempts: u32, delay: Duration) -> Self {
        Retry {
            inner,
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Consumes the decorator, returning the wrapped backend.
    pub fn into_inner(self) -> L {
        self.inner
    }

    async fn run<T, F, Fut>(&self, mut call: F) -> Result<T, LedgerError>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<T, LedgerError>> + Send,
    {
        let mut attempt = 1;
        loop {
            match call().await {
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %err,
                        "transient ledger failure, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}

#[async_trait]
impl<L: OperationRegistry> OperationRegistry for Retry<L> {
    async fn operations_by_output_material(
        &self,
        material: MaterialId,
        actor: &Address,
    ) -> Result<Vec<Operation>, LedgerError> {
        self.run(|| self.inner.operations_by_output_material(material, actor))
            .await
    }

    async fn operations_by_creator(&self, actor: &Address) -> Result<Vec<Operation>, LedgerError> {
        self.run(|| self.inner.operations_by_creator(actor)).await
    }
}

#[async_trait]
impl<L: TradeLedger> TradeLedger for Retry<L> {
    async fn trade_ids(&self, supplier: &Address) -> Result<Vec<TradeId>, LedgerError> {
        self.run(|| self.inner.trade_ids(supplier)).await
    }

    async fn trade_type_code(
        &self,
        supplier: &Address,
        trade: TradeId,
    ) -> Result<u8, LedgerError> {
        self.run(|| self.inner.trade_type_code(supplier, trade))
            .await
    }

    async fn trade_lines(
        &self,
        supplier: &Address,
        trade: TradeId,
    ) -> Result<Vec<Line>, LedgerError> {
        self.run(|| self.inner.trade_lines(supplier, trade)).await
    }

    async fn basic_trade(
        &self,
        supplier: &Address,
        trade: TradeId,
    ) -> Result<BasicTrade, LedgerError> {
        self.run(|| self.inner.basic_trade(supplier, trade)).await
    }

    async fn order_trade(
        &self,
        supplier: &Address,
        trade: TradeId,
    ) -> Result<OrderTrade, LedgerError> {
        self.run(|| self.inner.order_trade(supplier, trade)).await
    }
}
