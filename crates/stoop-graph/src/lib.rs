//! Stoop Social Graph
//!
//! Directed, weighted relationship graph over peer identities, with
//! PageRank-style importance scoring used as the discovery ordering signal.
//!
//! # Model
//!
//! - Nodes are [`PeerId`]s, created lazily on join or first edge reference.
//!   A new node is mesh-seeded: default-weight edges are added both ways
//!   between it and every pre-existing node, so new peers start weakly
//!   visible to (and from) everyone.
//! - Edges are directed and parallel edges per ordered pair are permitted
//!   but bounded: at most one default-weight and one smash-weight edge
//!   coexist for any (source, target) pair.
//! - Scores are computed on demand and cached; every mutation invalidates
//!   the cache.
//!
//! # Scoring
//!
//! The rank computation is topological: parallel edge multiplicity feeds
//! the transition matrix, stored edge weights do not enter the formula.
//! A smash therefore raises the target's rank by doubling the edge count
//! toward it, not by weighting a single edge.

mod graph;
mod pagerank;
mod peer;

pub use graph::{
    EdgeSnapshot, GraphSnapshot, NodeRef, RelationshipGraph, ScoreEntry, DEFAULT_EDGE_WEIGHT,
    SMASH_EDGE_WEIGHT,
};
pub use pagerank::{CONVERGENCE_EPSILON, DAMPING_FACTOR, MAX_ITERATIONS};
pub use peer::PeerId;
