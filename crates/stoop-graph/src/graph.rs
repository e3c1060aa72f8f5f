//! The relationship graph.
//!
//! An explicit adjacency structure: a node table keyed by [`PeerId`] plus a
//! multimap of ordered (source, target) pairs to the weights of the parallel
//! edges between them. All mutations are synchronous and invalidate the
//! cached score ranking; [`RelationshipGraph::get_scores`] recomputes it
//! lazily from the fully-applied edge set.
//!
//! The graph performs no identity checks: asking it to connect a peer to
//! itself will add a self-loop. Rejecting self-referential actions is the
//! orchestrator's job.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::pagerank;
use crate::PeerId;

/// Weight of a baseline mesh edge.
pub const DEFAULT_EDGE_WEIGHT: f64 = 20.0;

/// Weight of the edge layered on top by a smash.
pub const SMASH_EDGE_WEIGHT: f64 = 100.0;

/// Opaque handle to a node in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(usize);

impl NodeRef {
    /// Position of the node in insertion order.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One entry of the ranked discovery output.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreEntry {
    /// The scored peer.
    pub id: PeerId,
    /// PageRank importance, in (0, 1].
    pub score: f64,
}

/// A directed edge in a [`GraphSnapshot`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeSnapshot {
    pub source: PeerId,
    pub target: PeerId,
    pub weight: f64,
}

/// Serializable dump of the graph topology, for inspection and debugging.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphSnapshot {
    pub nodes: Vec<PeerId>,
    pub edges: Vec<EdgeSnapshot>,
}

/// Directed weighted graph over peers with cached importance scoring.
#[derive(Debug, Default)]
pub struct RelationshipGraph {
    /// Nodes in insertion order. Never removed for the process lifetime.
    nodes: Vec<PeerId>,
    /// PeerId -> position in `nodes`.
    index: HashMap<PeerId, usize>,
    /// Ordered (source, target) -> weights of the parallel edges.
    edges: HashMap<(usize, usize), Vec<f64>>,
    /// Sorted ranking, cleared by every mutation.
    scores: Option<Vec<ScoreEntry>>,
}

impl RelationshipGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the node for `id`, creating it if absent.
    ///
    /// On creation the new node is mesh-seeded: one default-weight edge in
    /// each direction between it and every pre-existing node.
    pub fn get_or_create(&mut self, id: &PeerId) -> NodeRef {
        if let Some(&existing) = self.index.get(id) {
            return NodeRef(existing);
        }

        let new_index = self.nodes.len();
        for existing in 0..new_index {
            self.edges
                .entry((new_index, existing))
                .or_default()
                .push(DEFAULT_EDGE_WEIGHT);
            self.edges
                .entry((existing, new_index))
                .or_default()
                .push(DEFAULT_EDGE_WEIGHT);
        }
        self.nodes.push(id.clone());
        self.index.insert(id.clone(), new_index);
        self.scores = None;

        debug!("{id} added & connected to the graph");
        NodeRef(new_index)
    }

    /// Ensure directed edges `a` -> `b`.
    ///
    /// A fresh pair gets a default-weight edge plus a smash-weight edge; a
    /// pair that already has one edge gets the smash edge only. A saturated
    /// pair (two edges) is left untouched so repeated smashes cannot
    /// accumulate parallel edges without bound.
    pub fn connect_directed(&mut self, a: &PeerId, b: &PeerId) {
        let source = self.get_or_create(a).0;
        let target = self.get_or_create(b).0;

        let existing = self
            .edges
            .get(&(source, target))
            .map(Vec::len)
            .unwrap_or(0);
        if existing >= 2 {
            info!("{existing} edges already found between {a} and {b}");
            return;
        }

        let weights = self.edges.entry((source, target)).or_default();
        if weights.is_empty() {
            weights.push(DEFAULT_EDGE_WEIGHT);
        }
        weights.push(SMASH_EDGE_WEIGHT);
        self.scores = None;

        debug!("nodes {a} and {b} connected");
    }

    /// Remove all directed edges `a` -> `b`.
    pub fn disconnect_directed(&mut self, a: &PeerId, b: &PeerId) {
        let source = self.get_or_create(a).0;
        let target = self.get_or_create(b).0;

        self.edges.remove(&(source, target));
        self.scores = None;

        debug!("nodes {a} and {b} disconnected");
    }

    /// Remove all directed edges `a` -> `b`, then restore the neutral
    /// baseline of exactly one default-weight edge.
    pub fn reset_edges(&mut self, a: &PeerId, b: &PeerId) {
        let source = self.get_or_create(a).0;
        let target = self.get_or_create(b).0;

        self.edges
            .insert((source, target), vec![DEFAULT_EDGE_WEIGHT]);
        self.scores = None;

        debug!("nodes {a} and {b} cleared");
    }

    /// The ranked scores, recomputed first if a mutation invalidated them.
    ///
    /// Sorted descending by score; ties keep node insertion order.
    pub fn get_scores(&mut self) -> &[ScoreEntry] {
        if self.scores.is_none() {
            debug!("refreshing graph scores");
            let multiplicity: HashMap<(usize, usize), usize> = self
                .edges
                .iter()
                .map(|(&pair, weights)| (pair, weights.len()))
                .collect();
            let ranks = pagerank::rank(self.nodes.len(), &multiplicity);
            let mut entries: Vec<ScoreEntry> = self
                .nodes
                .iter()
                .zip(&ranks)
                .map(|(id, &score)| ScoreEntry {
                    id: id.clone(),
                    score,
                })
                .collect();
            // Stable: equal scores stay in insertion order.
            entries.sort_by(|a, b| b.score.total_cmp(&a.score));
            self.scores = Some(entries);
        }
        self.scores.as_deref().unwrap_or_default()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether `id` has a node.
    pub fn contains(&self, id: &PeerId) -> bool {
        self.index.contains_key(id)
    }

    /// Number of parallel directed edges `a` -> `b` (0 if either is absent).
    pub fn edge_count(&self, a: &PeerId, b: &PeerId) -> usize {
        let (Some(&source), Some(&target)) = (self.index.get(a), self.index.get(b)) else {
            return 0;
        };
        self.edges
            .get(&(source, target))
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Dump the current topology.
    pub fn snapshot(&self) -> GraphSnapshot {
        let mut edges: Vec<EdgeSnapshot> = self
            .edges
            .iter()
            .flat_map(|(&(source, target), weights)| {
                weights.iter().map(move |&weight| EdgeSnapshot {
                    source: self.nodes[source].clone(),
                    target: self.nodes[target].clone(),
                    weight,
                })
            })
            .collect();
        edges.sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));
        GraphSnapshot {
            nodes: self.nodes.clone(),
            edges,
        }
    }
}
