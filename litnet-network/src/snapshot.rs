//! Immutable graph snapshots.
//!
//! A snapshot is the scored, thresholded view of one co-occurrence table
//! under one configuration. Identifiers are derived from term keys, so
//! rebuilding the same table with the same config reproduces the same ids.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use litnet_core::config::{CommunityEdgeAggregation, GraphConfig, WeightingMethod};
use litnet_core::errors::GraphError;
use litnet_core::models::{Pmid, TermKey};

use crate::aggregator::{CoOccurrenceTable, RelationLabel};
use crate::community::{self, Community, CommunityEdge, Link};
use crate::weighting;

/// Node identifier, the term key rendered as `type:canonical`.
pub type NodeId = String;
/// Edge identifier, `source|target` with the lower node id first.
pub type EdgeId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub term: TermKey,
    pub standardized_id: Option<String>,
    /// Document frequency of the term across the ingested set.
    pub num_documents: u32,
    /// Provenance across surviving incident edges; the term's own
    /// documents when the node is isolated.
    pub pmids: BTreeSet<Pmid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    /// Documents mentioning both endpoints.
    pub count: u32,
    pub weight: f64,
    pub pmids: BTreeSet<Pmid>,
    /// Relation labels surviving the confidence cutoff, per document.
    pub relations: BTreeMap<Pmid, BTreeSet<RelationLabel>>,
}

/// The thresholded co-occurrence graph plus its community structure.
///
/// Snapshots are immutable once built; callers share them behind `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: BTreeMap<NodeId, Node>,
    pub edges: BTreeMap<EdgeId, Edge>,
    pub communities: Vec<Community>,
    pub community_edges: Vec<CommunityEdge>,
    pub weighting_method: WeightingMethod,
    pub weight_cutoff: f64,
    pub num_documents: u32,
}

pub fn node_id(term: &TermKey) -> NodeId {
    term.to_string()
}

pub fn edge_id(source: &NodeId, target: &NodeId) -> EdgeId {
    format!("{source}|{target}")
}

/// Score, threshold, and cluster the aggregated table.
pub fn build_snapshot(
    table: &CoOccurrenceTable,
    config: &GraphConfig,
) -> Result<GraphSnapshot, GraphError> {
    config.validate()?;

    let max_count = table.pairs.values().map(|entry| entry.count).max().unwrap_or(0);

    let mut edges: BTreeMap<EdgeId, Edge> = BTreeMap::new();
    for (pair, entry) in &table.pairs {
        let weight = match config.weighting_method {
            WeightingMethod::Frequency => weighting::frequency_weight(entry.count, max_count),
            WeightingMethod::Npmi => weighting::clamped_npmi(
                table.terms[&pair.a].doc_frequency,
                table.terms[&pair.b].doc_frequency,
                entry.count,
                table.num_documents,
                config.min_doc_frequency,
            ),
        };
        if weight < config.weight_cutoff {
            continue;
        }
        let source = node_id(&pair.a);
        let target = node_id(&pair.b);
        let relations: BTreeMap<Pmid, BTreeSet<RelationLabel>> = entry
            .relations
            .iter()
            .map(|(pmid, labels)| {
                let kept: BTreeSet<RelationLabel> = labels
                    .iter()
                    .filter(|label| label.confidence >= config.relation_confidence_cutoff)
                    .cloned()
                    .collect();
                (pmid.clone(), kept)
            })
            .filter(|(_, kept)| !kept.is_empty())
            .collect();
        let id = edge_id(&source, &target);
        edges.insert(
            id.clone(),
            Edge {
                id,
                source,
                target,
                count: entry.count,
                weight,
                pmids: entry.pmids.clone(),
                relations,
            },
        );
    }

    let mut incident_pmids: BTreeMap<NodeId, BTreeSet<Pmid>> = BTreeMap::new();
    for edge in edges.values() {
        incident_pmids
            .entry(edge.source.clone())
            .or_default()
            .extend(edge.pmids.iter().cloned());
        incident_pmids
            .entry(edge.target.clone())
            .or_default()
            .extend(edge.pmids.iter().cloned());
    }

    let mut nodes: BTreeMap<NodeId, Node> = BTreeMap::new();
    for (term, stats) in &table.terms {
        let id = node_id(term);
        let connected = incident_pmids.contains_key(&id);
        if !connected && !config.retain_isolated {
            continue;
        }
        let pmids = incident_pmids
            .get(&id)
            .cloned()
            .unwrap_or_else(|| stats.pmids.clone());
        nodes.insert(
            id.clone(),
            Node {
                id,
                term: term.clone(),
                standardized_id: stats.standardized_id.clone(),
                num_documents: stats.doc_frequency,
                pmids,
            },
        );
    }

    let (communities, community_edges) = if config.detect_communities && !edges.is_empty() {
        detect(&nodes, &edges, config)
    } else {
        (Vec::new(), Vec::new())
    };

    tracing::info!(
        nodes = nodes.len(),
        edges = edges.len(),
        communities = communities.len(),
        method = ?config.weighting_method,
        cutoff = config.weight_cutoff,
        "built graph snapshot"
    );

    Ok(GraphSnapshot {
        nodes,
        edges,
        communities,
        community_edges,
        weighting_method: config.weighting_method,
        weight_cutoff: config.weight_cutoff,
        num_documents: table.num_documents,
    })
}

fn detect(
    nodes: &BTreeMap<NodeId, Node>,
    edges: &BTreeMap<EdgeId, Edge>,
    config: &GraphConfig,
) -> (Vec<Community>, Vec<CommunityEdge>) {
    let index_of: BTreeMap<&NodeId, usize> =
        nodes.keys().enumerate().map(|(i, id)| (id, i)).collect();
    let terms: Vec<TermKey> = nodes.values().map(|node| node.term.clone()).collect();

    // Modularity needs non-negative weights; NPMI edges are shifted by
    // the most negative surviving weight.
    let min_weight = edges
        .values()
        .map(|edge| edge.weight)
        .fold(f64::INFINITY, f64::min);
    let shift = if min_weight < 0.0 { -min_weight } else { 0.0 };

    let links: Vec<Link> = edges
        .values()
        .map(|edge| Link {
            a: index_of[&edge.source],
            b: index_of[&edge.target],
            weight: edge.weight + shift,
        })
        .collect();

    let assignment = community::assign(terms.len(), &links, config.max_louvain_passes);
    let communities = community::build_communities(&terms, &assignment, &links);

    let mut crossing: BTreeMap<(usize, usize), (f64, BTreeSet<Pmid>)> = BTreeMap::new();
    for edge in edges.values() {
        let (ca, cb) = (
            assignment[index_of[&edge.source]],
            assignment[index_of[&edge.target]],
        );
        if ca == cb {
            continue;
        }
        let key = (ca.min(cb), ca.max(cb));
        let slot = crossing
            .entry(key)
            .or_insert((f64::NEG_INFINITY, BTreeSet::new()));
        match config.community_edge_aggregation {
            CommunityEdgeAggregation::Max => slot.0 = slot.0.max(edge.weight),
            CommunityEdgeAggregation::Sum => {
                if slot.0 == f64::NEG_INFINITY {
                    slot.0 = 0.0;
                }
                slot.0 += edge.weight;
            }
        }
        slot.1.extend(edge.pmids.iter().cloned());
    }
    let community_edges = crossing
        .into_iter()
        .map(|((source, target), (weight, pmids))| CommunityEdge {
            source,
            target,
            weight,
            pmids,
        })
        .collect();

    (communities, community_edges)
}
