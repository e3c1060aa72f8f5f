//! Topological PageRank over the relationship graph.
//!
//! Power iteration with uniform teleport and uniform redistribution of
//! dangling-node mass. The transition probability from `u` to `v` is
//! `multiplicity(u, v) / out_degree(u)` where parallel edges each count —
//! this is the only way edge "strength" influences rank.

use std::collections::HashMap;

/// Teleport damping factor.
pub const DAMPING_FACTOR: f64 = 0.85;

/// Stop iterating once the L1 rank delta falls below this.
pub const CONVERGENCE_EPSILON: f64 = 1e-6;

/// Hard cap on power iterations.
pub const MAX_ITERATIONS: usize = 100;

/// Compute ranks for `node_count` nodes given directed edge multiplicities
/// keyed by (source, target) node index.
///
/// Returns one rank per node index; ranks sum to 1 for a non-empty graph.
pub(crate) fn rank(node_count: usize, multiplicity: &HashMap<(usize, usize), usize>) -> Vec<f64> {
    if node_count == 0 {
        return Vec::new();
    }

    let n = node_count as f64;
    let mut out_degree = vec![0usize; node_count];
    for (&(source, _), &count) in multiplicity {
        out_degree[source] += count;
    }

    let mut ranks = vec![1.0 / n; node_count];
    let mut next = vec![0.0; node_count];

    for _ in 0..MAX_ITERATIONS {
        // Mass held by nodes with no outgoing edges is spread uniformly.
        let dangling: f64 = ranks
            .iter()
            .zip(&out_degree)
            .filter(|(_, &deg)| deg == 0)
            .map(|(rank, _)| rank)
            .sum();

        let base = (1.0 - DAMPING_FACTOR) / n + DAMPING_FACTOR * dangling / n;
        next.iter_mut().for_each(|r| *r = base);

        for (&(source, target), &count) in multiplicity {
            let share = count as f64 / out_degree[source] as f64;
            next[target] += DAMPING_FACTOR * ranks[source] * share;
        }

        let delta: f64 = ranks
            .iter()
            .zip(&next)
            .map(|(old, new)| (old - new).abs())
            .sum();

        std::mem::swap(&mut ranks, &mut next);

        if delta < CONVERGENCE_EPSILON {
            break;
        }
    }

    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(list: &[(usize, usize, usize)]) -> HashMap<(usize, usize), usize> {
        list.iter().map(|&(s, t, m)| ((s, t), m)).collect()
    }

    #[test]
    fn empty_graph_has_no_ranks() {
        assert!(rank(0, &HashMap::new()).is_empty());
    }

    #[test]
    fn single_node_gets_full_mass() {
        let ranks = rank(1, &HashMap::new());
        assert_eq!(ranks.len(), 1);
        assert!((ranks[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn ranks_sum_to_one() {
        let ranks = rank(3, &edges(&[(0, 1, 1), (1, 2, 1), (2, 0, 1)]));
        let total: f64 = ranks.iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn symmetric_mesh_is_uniform() {
        // Full bidirectional mesh of 4 nodes at equal multiplicity.
        let mut list = Vec::new();
        for a in 0..4 {
            for b in 0..4 {
                if a != b {
                    list.push((a, b, 1));
                }
            }
        }
        let ranks = rank(4, &edges(&list));
        for pair in ranks.windows(2) {
            assert!((pair[0] - pair[1]).abs() < 1e-9);
        }
    }

    #[test]
    fn multiplicity_shifts_mass() {
        // 0 points at 1 twice and at 2 once; 1 and 2 point back at 0.
        let ranks = rank(
            3,
            &edges(&[(0, 1, 2), (0, 2, 1), (1, 0, 1), (2, 0, 1)]),
        );
        assert!(ranks[1] > ranks[2]);
    }

    #[test]
    fn dangling_mass_is_redistributed() {
        // 1 has no outgoing edges; total mass must still be conserved.
        let ranks = rank(2, &edges(&[(0, 1, 1)]));
        let total: f64 = ranks.iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
        assert!(ranks[1] > ranks[0]);
    }
}
