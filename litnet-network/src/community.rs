//! Deterministic community detection.
//!
//! Greedy modularity optimization (Louvain) with every source of
//! nondeterminism pinned down: nodes are swept in ascending index order,
//! equal-gain moves resolve to the lowest community id, and contraction
//! renumbers communities in ascending order. Repeated runs over the same
//! graph always produce the same partition.
//!
//! Link weights must be non-negative; the snapshot builder shifts NPMI
//! weights before calling in.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use litnet_core::models::{Pmid, TermKey};

const GAIN_EPSILON: f64 = 1e-12;

/// A weighted undirected link between node indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub weight: f64,
}

/// A detected community over snapshot nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    pub id: usize,
    /// Member terms in ascending key order.
    pub members: Vec<TermKey>,
    /// Highest weighted-degree member, ties to the lowest key.
    pub hub: TermKey,
}

/// Representative edge between two communities, one per crossing pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityEdge {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
    pub pmids: BTreeSet<Pmid>,
}

struct Graph {
    /// Neighbor lists without self-loops, parallel links pre-summed.
    adj: Vec<Vec<(usize, f64)>>,
    loops: Vec<f64>,
}

impl Graph {
    fn new(n_nodes: usize, links: &[Link]) -> Self {
        let mut weights: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        let mut loops = vec![0.0; n_nodes];
        for link in links {
            if link.a == link.b {
                loops[link.a] += link.weight;
            } else {
                let key = (link.a.min(link.b), link.a.max(link.b));
                *weights.entry(key).or_insert(0.0) += link.weight;
            }
        }
        let mut adj = vec![Vec::new(); n_nodes];
        for (&(a, b), &w) in &weights {
            adj[a].push((b, w));
            adj[b].push((a, w));
        }
        Self { adj, loops }
    }

    fn degree(&self, node: usize) -> f64 {
        let neighbors: f64 = self.adj[node].iter().map(|(_, w)| w).sum();
        neighbors + 2.0 * self.loops[node]
    }

    fn total_weight(&self) -> f64 {
        let links: f64 = self
            .adj
            .iter()
            .enumerate()
            .flat_map(|(i, nbrs)| nbrs.iter().filter(move |(j, _)| i < *j))
            .map(|(_, w)| w)
            .sum();
        links + self.loops.iter().sum::<f64>()
    }
}

/// Assign each node to a community, numbered 0..k in ascending order of
/// each community's lowest member index.
pub fn assign(n_nodes: usize, links: &[Link], max_passes: usize) -> Vec<usize> {
    let mut graph = Graph::new(n_nodes, links);
    let m = graph.total_weight();
    // node -> community of the current contracted graph
    let mut membership: Vec<usize> = (0..n_nodes).collect();

    if m > 0.0 {
        for pass in 0..max_passes {
            let (level, moved) = one_level(&graph, m);
            if !moved {
                break;
            }
            for entry in membership.iter_mut() {
                *entry = level[*entry];
            }
            let n_communities = level.iter().max().map_or(0, |max| max + 1);
            tracing::debug!(pass, communities = n_communities, "louvain contraction");
            graph = contract(&graph, &level, n_communities);
        }
    }

    renumber_by_lowest_member(&membership)
}

/// One sweep-until-stable local-move phase. Returns the community of each
/// node (compacted ascending) and whether any node moved.
fn one_level(graph: &Graph, m: f64) -> (Vec<usize>, bool) {
    let n = graph.adj.len();
    let mut community: Vec<usize> = (0..n).collect();
    let degrees: Vec<f64> = (0..n).map(|i| graph.degree(i)).collect();
    let mut sigma_tot = degrees.clone();
    let mut any_moved = false;

    loop {
        let mut moved_this_sweep = false;
        for node in 0..n {
            let current = community[node];
            let mut links_to: BTreeMap<usize, f64> = BTreeMap::new();
            for &(neighbor, weight) in &graph.adj[node] {
                *links_to.entry(community[neighbor]).or_insert(0.0) += weight;
            }
            sigma_tot[current] -= degrees[node];

            let gain_of = |target: usize, w_in: f64| w_in - sigma_tot[target] * degrees[node] / (2.0 * m);
            let mut best = current;
            let mut best_gain = gain_of(current, links_to.get(&current).copied().unwrap_or(0.0));
            for (&candidate, &w_in) in &links_to {
                if candidate == current {
                    continue;
                }
                let gain = gain_of(candidate, w_in);
                let wins = gain > best_gain + GAIN_EPSILON
                    || ((gain - best_gain).abs() <= GAIN_EPSILON && candidate < best);
                if wins {
                    best = candidate;
                    best_gain = gain;
                }
            }

            sigma_tot[best] += degrees[node];
            if best != current {
                community[node] = best;
                moved_this_sweep = true;
                any_moved = true;
            }
        }
        if !moved_this_sweep {
            break;
        }
    }

    (compact(&community), any_moved)
}

/// Renumber community labels to 0..k preserving ascending label order.
fn compact(labels: &[usize]) -> Vec<usize> {
    let distinct: BTreeSet<usize> = labels.iter().copied().collect();
    let mapping: BTreeMap<usize, usize> = distinct
        .into_iter()
        .enumerate()
        .map(|(new, old)| (old, new))
        .collect();
    labels.iter().map(|label| mapping[label]).collect()
}

fn contract(graph: &Graph, level: &[usize], n_communities: usize) -> Graph {
    let mut loops = vec![0.0; n_communities];
    let mut weights: BTreeMap<(usize, usize), f64> = BTreeMap::new();
    for (node, &c) in level.iter().enumerate() {
        loops[c] += graph.loops[node];
        for &(neighbor, weight) in &graph.adj[node] {
            if node < neighbor {
                let (ca, cb) = (level[node], level[neighbor]);
                if ca == cb {
                    loops[ca] += weight;
                } else {
                    let key = (ca.min(cb), ca.max(cb));
                    *weights.entry(key).or_insert(0.0) += weight;
                }
            }
        }
    }
    let mut adj = vec![Vec::new(); n_communities];
    for (&(a, b), &w) in &weights {
        adj[a].push((b, w));
        adj[b].push((a, w));
    }
    Graph { adj, loops }
}

/// Final ids: community containing node 0 (or the lowest unassigned node)
/// gets the lowest id, and so on.
fn renumber_by_lowest_member(membership: &[usize]) -> Vec<usize> {
    let mut mapping: BTreeMap<usize, usize> = BTreeMap::new();
    let mut result = Vec::with_capacity(membership.len());
    for &label in membership {
        let next = mapping.len();
        let id = *mapping.entry(label).or_insert(next);
        result.push(id);
    }
    result
}

/// Materialize [`Community`] records from an assignment.
pub fn build_communities(nodes: &[TermKey], assignment: &[usize], links: &[Link]) -> Vec<Community> {
    let mut degree = vec![0.0; nodes.len()];
    for link in links {
        degree[link.a] += link.weight;
        if link.a != link.b {
            degree[link.b] += link.weight;
        }
    }

    let n_communities = assignment.iter().max().map_or(0, |max| max + 1);
    let mut members: Vec<Vec<usize>> = vec![Vec::new(); n_communities];
    for (node, &c) in assignment.iter().enumerate() {
        members[c].push(node);
    }

    members
        .into_iter()
        .enumerate()
        .map(|(id, indices)| {
            let mut hub = indices[0];
            for &node in &indices[1..] {
                let better = degree[node] > degree[hub]
                    || (degree[node] == degree[hub] && nodes[node] < nodes[hub]);
                if better {
                    hub = node;
                }
            }
            let mut member_keys: Vec<TermKey> =
                indices.iter().map(|&node| nodes[node].clone()).collect();
            member_keys.sort();
            Community {
                id,
                members: member_keys,
                hub: nodes[hub].clone(),
            }
        })
        .collect()
}
