//! The provenance graph resolver.
//!
//! [`ProvenanceResolver::compute_graph`] reconstructs, for one material, the
//! chain of trades and processing operations that produced it. The descent
//! is depth-first and recursive: find the operation that output the
//! material, emit a node, then for each of its inputs find the trades that
//! carried it, emit edges labeled with those trades, and recurse into the
//! upstream supplier's records.
//!
//! Independent branches (sibling inputs, sibling carried materials) run
//! concurrently and join before the enclosing frame returns. The shared
//! accumulator sits behind a mutex; locks are held only across an append,
//! never across an await, so branches interleave freely.
//!
//! Termination: each frame registers its `(actor, material)` pair in a
//! visited set created fresh per top-level call. Consolidations (input id
//! equals output id) and diamond-shaped chains hit the set and stop instead
//! of descending forever. Because the set does not outlive the call,
//! repeated calls against the same accumulator still strictly append.
//!
//! Failures are fail-fast: the first branch to fail aborts the whole call,
//! and which of several concurrent failures surfaces is nondeterministic.
//! A partially-populated accumulator is never returned on error.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{try_join_all, BoxFuture, FutureExt};

use brewtrace_core::{Address, MaterialId};
use brewtrace_ledger::{OperationRegistry, TradeLedger};

use crate::error::ResolveError;
use crate::index::{find_trades_by_material, TradeMatch};
use crate::model::{GraphData, GraphEdge, GraphNode};

/// `(actor, material)` pairs already expanded in the current call.
type Visited = HashSet<(Address, MaterialId)>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Resolves provenance graphs against a pair of ledger accessors.
pub struct ProvenanceResolver {
    registry: Arc<dyn OperationRegistry>,
    trades: Arc<dyn TradeLedger>,
}

impl ProvenanceResolver {
    /// Creates a resolver over the given accessors.
    pub fn new(registry: Arc<dyn OperationRegistry>, trades: Arc<dyn TradeLedger>) -> Self {
        ProvenanceResolver { registry, trades }
    }

    /// Computes the provenance graph of `material` as recorded under
    /// `actor`, starting from an empty accumulator.
    pub async fn compute_graph(
        &self,
        material: MaterialId,
        actor: &Address,
    ) -> Result<GraphData, ResolveError> {
        self.compute_graph_into(material, actor, GraphData::new())
            .await
    }

    /// Computes into a caller-supplied accumulator.
    ///
    /// Appends are strictly monotonic: accumulating the same chain twice
    /// produces duplicate nodes and edges, and callers comparing results
    /// must treat entry order as unstable.
    pub async fn compute_graph_into(
        &self,
        material: MaterialId,
        actor: &Address,
        graph: GraphData,
    ) -> Result<GraphData, ResolveError> {
        tracing::debug!(%material, %actor, "computing provenance graph");
        let acc = Mutex::new(graph);
        let visited = Mutex::new(Visited::new());
        self.resolve(material, actor.clone(), &acc, &visited).await?;
        Ok(acc.into_inner().unwrap_or_else(PoisonError::into_inner))
    }

    /// One frame of the descent. Boxed because async recursion needs a
    /// nameable future type.
    fn resolve<'a>(
        &'a self,
        material: MaterialId,
        actor: Address,
        acc: &'a Mutex<GraphData>,
        visited: &'a Mutex<Visited>,
    ) -> BoxFuture<'a, Result<(), ResolveError>> {
        async move {
            if !lock(visited).insert((actor.clone(), material)) {
                tracing::debug!(%material, %actor, "already expanded, stopping descent");
                return Ok(());
            }

            let mut operations = self
                .registry
                .operations_by_output_material(material, &actor)
                .await?;
            let operation = match operations.len() {
                // Raw material: no recorded producer, legitimate terminal.
                0 => {
                    tracing::debug!(%material, %actor, "no producing operation recorded");
                    return Ok(());
                }
                1 => operations.remove(0),
                _ => {
                    return Err(ResolveError::AmbiguousProvenance {
                        material,
                        operations: operations.iter().map(|op| op.id).collect(),
                    });
                }
            };

            tracing::debug!(%material, %actor, operation = %operation.name, "emitting node");
            lock(acc).nodes.push(GraphNode {
                resource_id: operation.name.clone(),
            });

            let branches = operation
                .inputs
                .iter()
                .map(|input| self.trace_input(input.id, &actor, &operation.name, acc, visited));
            try_join_all(branches).await?;
            Ok(())
        }
        .boxed()
    }

    /// Follows one input material of an operation: finds the trades that
    /// carried it, emits edges, and recurses into the upstream records.
    async fn trace_input(
        &self,
        input: MaterialId,
        actor: &Address,
        consumer: &str,
        acc: &Mutex<GraphData>,
        visited: &Mutex<Visited>,
    ) -> Result<(), ResolveError> {
        let matches = find_trades_by_material(self.trades.as_ref(), actor, input).await?;
        if matches.is_empty() {
            tracing::debug!(%input, %actor, "no trades carry this material, branch ends");
            return Ok(());
        }

        let branches = carried_materials(&matches)
            .into_iter()
            .map(|(material, carrying)| {
                // The upstream scope is where the material was bought from:
                // the supplier recorded on the carrying trade.
                let upstream = carrying[0].trade.supplier().clone();
                let resources: Vec<String> =
                    carrying.iter().map(|m| m.trade.resource_id()).collect();
                async move {
                    let from = self.upstream_label(material, &upstream).await?;
                    lock(acc).edges.push(GraphEdge {
                        resources_ids: resources,
                        from,
                        to: consumer.to_string(),
                    });
                    self.resolve(material, upstream, acc, visited).await
                }
            });
        try_join_all(branches).await?;
        Ok(())
    }

    /// The upstream endpoint label for an edge: the producing operation's
    /// name under `scope`, or the scope's address when the chain originates
    /// there with no recorded producer.
    async fn upstream_label(
        &self,
        material: MaterialId,
        scope: &Address,
    ) -> Result<String, ResolveError> {
        let operations = self
            .registry
            .operations_by_output_material(material, scope)
            .await?;
        match operations.len() {
            0 => Ok(scope.to_string()),
            1 => Ok(operations[0].name.clone()),
            _ => Err(ResolveError::AmbiguousProvenance {
                material,
                operations: operations.iter().map(|op| op.id).collect(),
            }),
        }
    }
}

/// Groups the matched trades by the distinct material ids their matching
/// lines reference, in first-seen order.
///
/// One trade can carry several distinct materials across different lines, so
/// a single lookup result can fan out into several upstream branches.
fn carried_materials(matches: &[TradeMatch]) -> Vec<(MaterialId, Vec<&TradeMatch>)> {
    let mut order: Vec<MaterialId> = Vec::new();
    for matched in matches {
        for line in &matched.lines {
            if let Some(material) = &line.material {
                if !order.contains(&material.id) {
                    order.push(material.id);
                }
            }
        }
    }

    order
        .into_iter()
        .map(|id| {
            let carrying = matches
                .iter()
                .filter(|m| m.lines.iter().any(|line| line.matches_material(id)))
                .collect();
            (id, carrying)
        })
        .collect()
}
