//! The provenance graph accumulator.
//!
//! [`GraphData`] is both the resolver's output and its working state: a flat
//! node list and edge list, mutated in place through the recursive descent
//! and returned to the caller. Appends are monotonic -- the core never
//! removes or deduplicates entries, and insertion order across concurrent
//! branches is unstable. Consumers that need a renderable view use
//! [`crate::export`].
//!
//! Field names serialize in the camelCase shape the platform UI consumes.

use serde::{Deserialize, Serialize};

use brewtrace_core::{Address, TradeId};

/// A graph node: one processing operation, labeled by its resource id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Operation resource identifier (the operation's display name).
    pub resource_id: String,
}

/// A graph edge: a material transfer between two operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    /// Resource ids of every trade that carried the material, formatted
    /// `"{supplier}_trade_{tradeId}"`.
    pub resources_ids: Vec<String>,
    /// Upstream endpoint: the producing operation's name, or the supplier
    /// address when the chain originates there with no recorded producer.
    pub from: String,
    /// Downstream endpoint: the consuming operation's name.
    pub to: String,
}

/// The accumulator: appended-to in place, never pruned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    /// One entry per operation traversal (duplicates possible across
    /// repeated accumulation into the same instance).
    pub nodes: Vec<GraphNode>,
    /// One entry per material transfer discovered.
    pub edges: Vec<GraphEdge>,
}

impl GraphData {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Formats the platform-wide resource identifier of a trade,
/// `"{supplier}_trade_{tradeId}"`.
pub fn trade_resource_id(supplier: &Address, trade: TradeId) -> String {
    format!("{supplier}_trade_{trade}")
}
