//! Closeness centrality as the inverse of mean hop distance.
//!
//! `closeness(v) = 1 / mean(d(v, u))` over every `u != v` reachable from `v`.
//!
//! This is the inverse-of-average form, not the classical inverse-of-sum
//! `1 / Σ d(v, u)`. Averaging over reachable nodes only keeps scores
//! comparable across components of different sizes. A node that reaches
//! nothing scores 0.0.

use std::collections::BTreeMap;

use tracing::instrument;

use crate::graph::Graph;
use crate::graph::path::mean_hop_distance;

/// Compute closeness centrality for every node.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn closeness_centrality(graph: &Graph) -> BTreeMap<String, f64> {
    let view = graph.indexed();

    (0..view.len())
        .map(|v| {
            let score = match mean_hop_distance(&view, v) {
                Some(mean) if mean > 0.0 => 1.0 / mean,
                _ => 0.0,
            };
            (view.ids[v].to_string(), score)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeAttrs;

    #[test]
    fn empty_graph_returns_empty() {
        assert!(closeness_centrality(&Graph::new()).is_empty());
    }

    #[test]
    fn isolated_node_is_zero() {
        let mut g = Graph::new();
        g.add_node("A", NodeAttrs::new());
        g.add_edge("B", "C", 1);
        let cc = closeness_centrality(&g);
        assert_eq!(cc["A"], 0.0);
        assert_eq!(cc["B"], 1.0);
    }

    #[test]
    fn path_uses_average_not_sum() {
        // A — B — C: A's distances are 1 and 2, mean 1.5.
        let mut g = Graph::new();
        g.add_edge("A", "B", 1);
        g.add_edge("B", "C", 1);
        let cc = closeness_centrality(&g);

        assert!((cc["A"] - 1.0 / 1.5).abs() < 1e-12, "got {}", cc["A"]);
        assert!((cc["B"] - 1.0).abs() < 1e-12);
        assert!((cc["C"] - cc["A"]).abs() < 1e-12);
    }

    #[test]
    fn component_size_does_not_dilute_score() {
        // A pair and a triangle: every node is one hop from all it can reach.
        let mut g = Graph::new();
        g.add_edge("A", "B", 1);
        g.add_edge("C", "D", 1);
        g.add_edge("D", "E", 1);
        g.add_edge("C", "E", 1);
        let cc = closeness_centrality(&g);
        for id in ["A", "B", "C", "D", "E"] {
            assert!((cc[id] - 1.0).abs() < 1e-12, "{id}: {}", cc[id]);
        }
    }
}
