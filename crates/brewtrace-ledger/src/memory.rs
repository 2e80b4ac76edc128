//! In-memory implementation of the ledger traits.
//!
//! [`InMemoryLedger`] is a first-class backend for tests, demos and offline
//! fixtures. It stores all data behind a `RwLock` with the same read
//! semantics as the remote clients: per-scope indexing, insertion-ordered
//! trade enumeration, and raw type codes on trades.
//!
//! The backend can also inject transient faults ([`InMemoryLedger::inject_remote_faults`])
//! so callers can exercise their failure paths without a flaky network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use indexmap::IndexMap;

use brewtrace_core::{
    Address, BasicTrade, Line, MaterialId, Operation, OrderTrade, Trade, TradeId,
};

use crate::error::LedgerError;
use crate::traits::{OperationRegistry, TradeLedger};

/// A trade as stored: the record plus its raw wire type code.
///
/// The code is kept separately from the variant so tests can store a code
/// outside the known set and exercise the invalid-type path.
struct StoredTrade {
    type_code: u8,
    trade: Trade,
}

#[derive(Default)]
struct State {
    /// All registered operations, across every creator scope.
    operations: Vec<Operation>,
    /// Trades per scope. `IndexMap` preserves registration order, matching
    /// the insertion-order enumeration the remote registries provide.
    trades: HashMap<Address, IndexMap<TradeId, StoredTrade>>,
}

/// In-memory implementation of [`OperationRegistry`] and [`TradeLedger`].
#[derive(Default)]
pub struct InMemoryLedger {
    state: RwLock<State>,
    /// Remaining accessor calls that should fail with a transient error.
    remote_faults: AtomicUsize,
}

impl InMemoryLedger {
    /// Creates a new empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an operation under its creator scope.
    pub fn add_operation(&self, operation: Operation) {
        self.write().operations.push(operation);
    }

    /// Registers a basic trade under `scope`.
    pub fn add_basic_trade(&self, scope: &Address, trade: BasicTrade) {
        self.add_trade(scope, Trade::Basic(trade));
    }

    /// Registers an order trade under `scope`.
    pub fn add_order_trade(&self, scope: &Address, trade: OrderTrade) {
        self.add_trade(scope, Trade::Order(trade));
    }

    fn add_trade(&self, scope: &Address, trade: Trade) {
        let type_code = trade.trade_type().code();
        self.write()
            .trades
            .entry(scope.clone())
            .or_default()
            .insert(trade.id(), StoredTrade { type_code, trade });
    }

    /// Overwrites the stored wire type code of a trade.
    ///
    /// Used in tests to simulate a registry answering with a code outside
    /// the known variant set.
    pub fn override_trade_type_code(
        &self,
        scope: &Address,
        trade: TradeId,
        code: u8,
    ) -> Result<(), LedgerError> {
        let mut state = self.write();
        let stored = state
            .trades
            .get_mut(scope)
            .and_then(|m| m.get_mut(&trade))
            .ok_or_else(|| LedgerError::TradeNotFound {
                supplier: scope.clone(),
                trade,
            })?;
        stored.type_code = code;
        Ok(())
    }

    /// Makes the next `n` accessor calls fail with a transient
    /// [`LedgerError::Remote`].
    pub fn inject_remote_faults(&self, n: usize) {
        self.remote_faults.store(n, Ordering::SeqCst);
    }

    fn take_fault(&self) -> Result<(), LedgerError> {
        let mut current = self.remote_faults.load(Ordering::SeqCst);
        while current > 0 {
            match self.remote_faults.compare_exchange(
                current,
                current - 1,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return Err(LedgerError::remote("injected fault")),
                Err(actual) => current = actual,
            }
        }
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` against one stored trade, or errors if it is unknown.
    fn with_trade<T>(
        &self,
        supplier: &Address,
        trade: TradeId,
        f: impl FnOnce(&StoredTrade) -> T,
    ) -> Result<T, LedgerError> {
        let state = self.read();
        state
            .trades
            .get(supplier)
            .and_then(|m| m.get(&trade))
            .map(f)
            .ok_or_else(|| LedgerError::TradeNotFound {
                supplier: supplier.clone(),
                trade,
            })
    }
}

#[async_trait]
impl OperationRegistry for InMemoryLedger {
    async fn operations_by_output_material(
        &self,
        material: MaterialId,
        actor: &Address,
    ) -> Result<Vec<Operation>, LedgerError> {
        self.take_fault()?;
        Ok(self
            .read()
            .operations
            .iter()
            .filter(|op| op.output.id == material && &op.creator == actor)
            .cloned()
            .collect())
    }

    async fn operations_by_creator(&self, actor: &Address) -> Result<Vec<Operation>, LedgerError> {
        self.take_fault()?;
        Ok(self
            .read()
            .operations
            .iter()
            .filter(|op| &op.creator == actor)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TradeLedger for InMemoryLedger {
    async fn trade_ids(&self, supplier: &Address) -> Result<Vec<TradeId>, LedgerError> {
        self.take_fault()?;
        Ok(self
            .read()
            .trades
            .get(supplier)
            .map(|m| m.keys().copied().collect())
            .unwrap_or_default())
    }

    async fn trade_type_code(
        &self,
        supplier: &Address,
        trade: TradeId,
    ) -> Result<u8, LedgerError> {
        self.take_fault()?;
        self.with_trade(supplier, trade, |stored| stored.type_code)
    }

    async fn trade_lines(
        &self,
        supplier: &Address,
        trade: TradeId,
    ) -> Result<Vec<Line>, LedgerError> {
        self.take_fault()?;
        self.with_trade(supplier, trade, |stored| stored.trade.lines().to_vec())
    }

    async fn basic_trade(
        &self,
        supplier: &Address,
        trade: TradeId,
    ) -> Result<BasicTrade, LedgerError> {
        self.take_fault()?;
        let record = self.with_trade(supplier, trade, |stored| stored.trade.clone())?;
        match record {
            Trade::Basic(basic) => Ok(basic),
            Trade::Order(_) => Err(LedgerError::VariantMismatch {
                supplier: supplier.clone(),
                trade,
                expected: brewtrace_core::TradeType::Basic,
            }),
        }
    }

    async fn order_trade(
        &self,
        supplier: &Address,
        trade: TradeId,
    ) -> Result<OrderTrade, LedgerError> {
        self.take_fault()?;
        let record = self.with_trade(supplier, trade, |stored| stored.trade.clone())?;
        match record {
            Trade::Order(order) => Ok(order),
            Trade::Basic(_) => Err(LedgerError::VariantMismatch {
                supplier: supplier.clone(),
                trade,
                expected: brewtrace_core::TradeType::Order,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewtrace_core::{CategoryId, Material, OperationId, ProductCategory, TradeInfo};

    fn category() -> ProductCategory {
        ProductCategory::new(CategoryId(1), "Arabica", 85, "")
    }

    fn material(id: u64) -> Material {
        Material::new(MaterialId(id), category())
    }

    fn basic_trade(id: u64, supplier: &str, lines: Vec<Line>) -> BasicTrade {
        BasicTrade {
            info: TradeInfo {
                id: TradeId(id),
                supplier: Address::new(supplier),
                customer: Address::new("0xCUST"),
                commissioner: Address::new("0xCOMM"),
                external_url: String::new(),
            },
            lines,
        }
    }

    #[tokio::test]
    async fn trade_ids_preserve_insertion_order() {
        let ledger = InMemoryLedger::new();
        let scope = Address::new("0xB");
        ledger.add_basic_trade(&scope, basic_trade(30, "0xA", vec![]));
        ledger.add_basic_trade(&scope, basic_trade(10, "0xA", vec![]));
        ledger.add_basic_trade(&scope, basic_trade(20, "0xA", vec![]));

        let ids = ledger.trade_ids(&scope).await.unwrap();
        assert_eq!(ids, vec![TradeId(30), TradeId(10), TradeId(20)]);
    }

    #[tokio::test]
    async fn unknown_supplier_has_no_trades() {
        let ledger = InMemoryLedger::new();
        let ids = ledger.trade_ids(&Address::new("0xNOBODY")).await.unwrap();
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn operations_are_scoped_to_creator() {
        let ledger = InMemoryLedger::new();
        ledger.add_operation(Operation::new(
            OperationId(1),
            "roast",
            [material(1)],
            material(2),
            Address::new("0xA"),
        ));
        ledger.add_operation(Operation::new(
            OperationId(2),
            "roast",
            [material(1)],
            material(2),
            Address::new("0xB"),
        ));

        let ops = ledger
            .operations_by_output_material(MaterialId(2), &Address::new("0xA"))
            .await
            .unwrap();
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].id, OperationId(1));

        let ops = ledger
            .operations_by_creator(&Address::new("0xB"))
            .await
            .unwrap();
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].id, OperationId(2));
    }

    #[tokio::test]
    async fn variant_mismatch_on_wrong_accessor() {
        let ledger = InMemoryLedger::new();
        let scope = Address::new("0xB");
        ledger.add_basic_trade(&scope, basic_trade(1, "0xA", vec![]));

        let err = ledger.order_trade(&scope, TradeId(1)).await.unwrap_err();
        assert!(matches!(err, LedgerError::VariantMismatch { .. }));

        let ok = ledger.basic_trade(&scope, TradeId(1)).await;
        assert!(ok.is_ok());
    }

    #[tokio::test]
    async fn missing_trade_is_not_found() {
        let ledger = InMemoryLedger::new();
        let err = ledger
            .trade_type_code(&Address::new("0xB"), TradeId(404))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::TradeNotFound { .. }));
    }

    #[tokio::test]
    async fn override_changes_reported_type_code() {
        let ledger = InMemoryLedger::new();
        let scope = Address::new("0xB");
        ledger.add_basic_trade(&scope, basic_trade(1, "0xA", vec![]));
        ledger.override_trade_type_code(&scope, TradeId(1), 9).unwrap();

        let code = ledger.trade_type_code(&scope, TradeId(1)).await.unwrap();
        assert_eq!(code, 9);
    }

    #[tokio::test]
    async fn injected_faults_fail_then_clear() {
        let ledger = InMemoryLedger::new();
        let scope = Address::new("0xB");
        ledger.inject_remote_faults(2);

        assert!(ledger.trade_ids(&scope).await.unwrap_err().is_transient());
        assert!(ledger.trade_ids(&scope).await.unwrap_err().is_transient());
        assert!(ledger.trade_ids(&scope).await.is_ok());
    }
}
