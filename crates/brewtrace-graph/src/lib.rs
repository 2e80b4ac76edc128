//! Provenance graph core for the brewtrace SDK.
//!
//! Given a material, this crate reconstructs the chain of trades and
//! processing operations that produced it, across organizations that each
//! control disjoint, locally-indexed record spaces. The result is a directed
//! graph of operation nodes connected by trade-labeled edges, suitable for
//! rendering in the platform UI.
//!
//! # Modules
//!
//! - [`model`]: GraphData accumulator (nodes, edges, resource-id formatting)
//! - [`index`]: trade lookup index (`find_trades_by_material`)
//! - [`resolver`]: the recursive provenance resolver (`ProvenanceResolver`)
//! - [`export`]: petgraph / Graphviz views over a computed graph
//! - [`error`]: ResolveError enum

pub mod error;
pub mod export;
pub mod index;
pub mod model;
pub mod resolver;

// Re-export key types for ergonomic use.
pub use error::ResolveError;
pub use index::{find_trades_by_material, TradeMatch};
pub use model::{trade_resource_id, GraphData, GraphEdge, GraphNode};
pub use resolver::ProvenanceResolver;
