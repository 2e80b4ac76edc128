//! Rendering views over a computed [`GraphData`].
//!
//! The accumulator is a flat append-only structure; UIs and diagram tools
//! want a deduplicated graph. [`to_petgraph`] builds that view (one node per
//! distinct resource id, edge weights carrying the trade resource ids) and
//! [`to_dot`] renders it as Graphviz. Neither touches the accumulator
//! itself.

use std::collections::HashMap;

use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::model::GraphData;

fn node_index<'a>(
    graph: &mut DiGraph<String, Vec<String>>,
    indices: &mut HashMap<&'a str, NodeIndex>,
    id: &'a str,
) -> NodeIndex {
    *indices
        .entry(id)
        .or_insert_with(|| graph.add_node(id.to_string()))
}

/// Builds a deduplicated petgraph view of the accumulator.
///
/// Node weights are resource ids; edge weights are the trade resource ids
/// that carried the material. Edge endpoints that never appeared as nodes
/// (origin-of-chain supplier labels) get their own node so the rendered
/// graph has no dangling references.
pub fn to_petgraph(graph: &GraphData) -> DiGraph<String, Vec<String>> {
    let mut out = DiGraph::new();
    let mut indices: HashMap<&str, NodeIndex> = HashMap::new();

    for node in &graph.nodes {
        node_index(&mut out, &mut indices, &node.resource_id);
    }
    for edge in &graph.edges {
        let from = node_index(&mut out, &mut indices, &edge.from);
        let to = node_index(&mut out, &mut indices, &edge.to);
        out.add_edge(from, to, edge.resources_ids.clone());
    }
    out
}

/// Renders the deduplicated view in Graphviz dot syntax, edge labels
/// joining the carrying trades.
pub fn to_dot(graph: &GraphData) -> String {
    let view = to_petgraph(graph);
    let labeled = view.map(|_, node| node.clone(), |_, trades| trades.join(", "));
    format!("{}", Dot::new(&labeled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GraphEdge, GraphNode};

    fn node(id: &str) -> GraphNode {
        GraphNode {
            resource_id: id.to_string(),
        }
    }

    fn edge(from: &str, to: &str, trades: &[&str]) -> GraphEdge {
        GraphEdge {
            resources_ids: trades.iter().map(|t| t.to_string()).collect(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    #[test]
    fn duplicate_nodes_collapse_in_view() {
        let graph = GraphData {
            nodes: vec![node("roast"), node("roast"), node("mill")],
            edges: vec![edge("mill", "roast", &["0xA_trade_1"])],
        };
        let view = to_petgraph(&graph);
        assert_eq!(view.node_count(), 2);
        assert_eq!(view.edge_count(), 1);
    }

    #[test]
    fn dangling_origin_endpoint_gets_a_node() {
        let graph = GraphData {
            nodes: vec![node("roast")],
            edges: vec![edge("0xA", "roast", &["0xA_trade_100"])],
        };
        let view = to_petgraph(&graph);
        assert_eq!(view.node_count(), 2);
        let weights: Vec<&String> = view.node_weights().collect();
        assert!(weights.iter().any(|w| w.as_str() == "0xA"));
    }

    #[test]
    fn dot_output_contains_labels() {
        let graph = GraphData {
            nodes: vec![node("roast"), node("mill")],
            edges: vec![edge("mill", "roast", &["0xA_trade_1", "0xA_trade_2"])],
        };
        let dot = to_dot(&graph);
        assert!(dot.contains("roast"));
        assert!(dot.contains("mill"));
        assert!(dot.contains("0xA_trade_1, 0xA_trade_2"));
    }
}
