//! Subgraph selection.
//!
//! A selection captures owned copies of the chosen nodes and edges plus
//! everything induced around them, so a later snapshot rebuild can never
//! pull data out from under an in-flight chat session.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use litnet_core::errors::GraphError;
use litnet_core::models::Pmid;

use crate::snapshot::{Edge, EdgeId, GraphSnapshot, Node, NodeId};

/// A user-chosen subgraph and the evidence it reaches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub id: String,
    /// Ids the user explicitly picked.
    pub node_ids: BTreeSet<NodeId>,
    pub edge_ids: BTreeSet<EdgeId>,
    /// Union of provenance across the induced subgraph.
    pub pmids: BTreeSet<Pmid>,
    /// Induced nodes, owned.
    pub nodes: BTreeMap<NodeId, Node>,
    /// Selected edges plus incident edges of selected nodes, owned.
    pub edges: BTreeMap<EdgeId, Edge>,
}

/// Resolve a set of node and edge ids against a snapshot.
///
/// Fails fast on an empty selection or any unknown id; the snapshot is
/// never modified.
pub fn select(
    snapshot: &GraphSnapshot,
    node_ids: &[String],
    edge_ids: &[String],
) -> Result<Selection, GraphError> {
    if node_ids.is_empty() && edge_ids.is_empty() {
        return Err(GraphError::EmptySelection);
    }

    let mut selected_nodes: BTreeSet<NodeId> = BTreeSet::new();
    for id in node_ids {
        if !snapshot.nodes.contains_key(id) {
            return Err(GraphError::NodeNotFound { id: id.clone() });
        }
        selected_nodes.insert(id.clone());
    }
    let mut selected_edges: BTreeSet<EdgeId> = BTreeSet::new();
    for id in edge_ids {
        if !snapshot.edges.contains_key(id) {
            return Err(GraphError::EdgeNotFound { id: id.clone() });
        }
        selected_edges.insert(id.clone());
    }

    let mut edges: BTreeMap<EdgeId, Edge> = BTreeMap::new();
    for id in &selected_edges {
        edges.insert(id.clone(), snapshot.edges[id].clone());
    }
    for edge in snapshot.edges.values() {
        if selected_nodes.contains(&edge.source) || selected_nodes.contains(&edge.target) {
            edges.entry(edge.id.clone()).or_insert_with(|| edge.clone());
        }
    }

    let mut nodes: BTreeMap<NodeId, Node> = BTreeMap::new();
    for id in &selected_nodes {
        nodes.insert(id.clone(), snapshot.nodes[id].clone());
    }
    for edge in edges.values() {
        for endpoint in [&edge.source, &edge.target] {
            if let Some(node) = snapshot.nodes.get(endpoint) {
                nodes.entry(endpoint.clone()).or_insert_with(|| node.clone());
            }
        }
    }

    let mut pmids: BTreeSet<Pmid> = BTreeSet::new();
    for edge in edges.values() {
        pmids.extend(edge.pmids.iter().cloned());
    }
    for id in &selected_nodes {
        pmids.extend(nodes[id].pmids.iter().cloned());
    }

    let selection = Selection {
        id: Uuid::new_v4().to_string(),
        node_ids: selected_nodes,
        edge_ids: selected_edges,
        pmids,
        nodes,
        edges,
    };
    tracing::debug!(
        selection = %selection.id,
        nodes = selection.nodes.len(),
        edges = selection.edges.len(),
        pmids = selection.pmids.len(),
        "selected subgraph"
    );
    Ok(selection)
}
