//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a node lies on shortest paths
//! between other pairs of nodes. High-betweenness students or courses are
//! the bridges between otherwise separate clusters.
//!
//! # Algorithm
//!
//! Brandes (2001) for unweighted graphs:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts
//!    (`sigma`) and predecessor lists.
//! 2. Accumulate dependency scores in reverse BFS order (farthest nodes first).
//! 3. Sum the dependency scores across all source nodes.
//!
//! Edge weights are ignored: only hop distance and the number of shortest
//! paths matter. Complexity: O(V * E).
//!
//! # Normalization
//!
//! Every source is run on an undirected graph, so each pair is seen from
//! both ends. Raw sums are scaled by `2 / ((n-1)(n-2))` when `n > 2`. With
//! `n <= 2` no node can be strictly between two others and every score is 0.

use std::collections::{BTreeMap, VecDeque};

use tracing::instrument;

use crate::graph::Graph;

/// Compute normalized betweenness centrality for every node.
///
/// # Returns
///
/// A map from node id to score. Isolated nodes and nodes with no shortest
/// paths through them receive 0.0. An empty graph yields an empty map.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn betweenness_centrality(graph: &Graph) -> BTreeMap<String, f64> {
    let view = graph.indexed();
    let n = view.len();

    if n == 0 {
        return BTreeMap::new();
    }

    // Node-indexed betweenness accumulator.
    let mut cb: Vec<f64> = vec![0.0; n];

    for s in 0..n {
        // Nodes in order of discovery (farthest popped first).
        let mut stack: Vec<usize> = Vec::with_capacity(n);

        // predecessors[w] = nodes immediately preceding w on shortest paths from s.
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];

        // sigma[t]: number of shortest paths from s to t.
        let mut sigma: Vec<f64> = vec![0.0; n];
        sigma[s] = 1.0;

        // dist[t]: distance from s to t (-1 = unvisited).
        let mut dist: Vec<i64> = vec![-1; n];
        dist[s] = 0;

        let mut queue: VecDeque<usize> = VecDeque::from([s]);

        while let Some(v) = queue.pop_front() {
            stack.push(v);

            for &(w, _) in &view.adj[v] {
                // First visit to w?
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }

                // Shortest path to w via v?
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order.
        let mut delta: Vec<f64> = vec![0.0; n];

        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                if sigma[w] > 0.0 {
                    delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
                }
            }

            if w != s {
                cb[w] += delta[w];
            }
        }
    }

    if n > 2 {
        let norm = normalization_factor(n);
        for score in &mut cb {
            *score *= norm;
        }
    }

    view.ids
        .iter()
        .zip(cb)
        .map(|(id, score)| ((*id).to_string(), score))
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn normalization_factor(n: usize) -> f64 {
    2.0 / ((n - 1) as f64 * (n - 2) as f64)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeAttrs;

    fn make_graph(edges: &[(&str, &str)]) -> Graph {
        let mut g = Graph::new();
        for (a, b) in edges {
            g.add_edge(a, b, 1);
        }
        g
    }

    fn make_graph_nodes(nodes: &[&str], edges: &[(&str, &str)]) -> Graph {
        let mut g = make_graph(edges);
        for id in nodes {
            if !g.contains_node(id) {
                g.add_node(id, NodeAttrs::new());
            }
        }
        g
    }

    #[test]
    fn empty_graph_returns_empty() {
        let bc = betweenness_centrality(&make_graph_nodes(&[], &[]));
        assert!(bc.is_empty());
    }

    #[test]
    fn single_node_zero_betweenness() {
        let bc = betweenness_centrality(&make_graph_nodes(&["A"], &[]));
        assert_eq!(bc.get("A"), Some(&0.0));
    }

    #[test]
    fn two_nodes_zero_betweenness() {
        let bc = betweenness_centrality(&make_graph(&[("A", "B")]));
        assert_eq!(bc["A"], 0.0);
        assert_eq!(bc["B"], 0.0);
    }

    #[test]
    fn path_of_three_middle_node() {
        // A — B — C
        // Raw: B lies on A→C and C→A = 2. Scaled by 2/((2)(1)) = 2.0.
        let bc = betweenness_centrality(&make_graph(&[("A", "B"), ("B", "C")]));

        assert!((bc["A"] - 0.0).abs() < 1e-10, "A is a leaf");
        assert!((bc["B"] - 2.0).abs() < 1e-10, "B bridges A and C: got {}", bc["B"]);
        assert!((bc["C"] - 0.0).abs() < 1e-10, "C is a leaf");
    }

    #[test]
    fn star_center_carries_all_paths() {
        // Center C with leaves A, B, D, E: every leaf pair routes through C.
        // Raw: 4 * 3 ordered leaf pairs = 12. Scaled by 2/((4)(3)) = 2.0.
        let bc = betweenness_centrality(&make_graph(&[
            ("C", "A"),
            ("C", "B"),
            ("C", "D"),
            ("C", "E"),
        ]));

        assert!((bc["C"] - 2.0).abs() < 1e-10, "center: got {}", bc["C"]);
        for leaf in ["A", "B", "D", "E"] {
            assert!((bc[leaf] - 0.0).abs() < 1e-10, "{leaf} is a leaf");
        }
    }

    #[test]
    fn square_splits_paths_between_two_routes() {
        // A — B — D — C — A (4-cycle)
        // Opposite pair (A, D) has two shortest paths, via B and via C.
        // Raw for B: pairs (A,D) and (D,A) at 1/2 each = 1.0.
        // Scaled by 2/((3)(2)) = 1/3.
        let bc = betweenness_centrality(&make_graph(&[
            ("A", "B"),
            ("B", "D"),
            ("D", "C"),
            ("C", "A"),
        ]));

        for id in ["A", "B", "C", "D"] {
            assert!(
                (bc[id] - 1.0 / 3.0).abs() < 1e-10,
                "{id} in symmetric square: got {}",
                bc[id]
            );
        }
    }

    #[test]
    fn chain_of_four_betweenness() {
        // A — B — C — D
        // B is on A–C and A–D, each seen from both ends → raw 4. Scaled: 4 * 2/6 = 4/3.
        let bc = betweenness_centrality(&make_graph(&[("A", "B"), ("B", "C"), ("C", "D")]));

        assert!((bc["A"] - 0.0).abs() < 1e-10);
        assert!((bc["B"] - 4.0 / 3.0).abs() < 1e-10, "got {}", bc["B"]);
        assert!((bc["C"] - bc["B"]).abs() < 1e-10, "symmetric chain");
        assert!((bc["D"] - 0.0).abs() < 1e-10);
    }

    #[test]
    fn disconnected_components_no_cross_betweenness() {
        let bc = betweenness_centrality(&make_graph(&[("A", "B"), ("C", "D")]));
        for id in ["A", "B", "C", "D"] {
            assert!((bc[id] - 0.0).abs() < 1e-10, "{id} = 0 in disconnected pairs");
        }
    }

    #[test]
    fn weights_do_not_affect_betweenness() {
        let mut heavy = Graph::new();
        heavy.add_edge("A", "B", 9);
        heavy.add_edge("B", "C", 1);
        heavy.add_edge("A", "C", 7);
        let light = make_graph(&[("A", "B"), ("B", "C"), ("A", "C")]);

        assert_eq!(betweenness_centrality(&heavy), betweenness_centrality(&light));
    }
}
