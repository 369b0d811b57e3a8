//! Breadth-first hop distances.
//!
//! Edge weights are ignored here: distance is the number of hops, and BFS
//! order guarantees the first time a node is reached is along a shortest
//! path.

use std::collections::{BTreeMap, VecDeque};

use super::weighted::{Graph, IndexedGraph};

/// Hop distance from `source` to every node reachable from it.
///
/// The source maps to 0. Unreachable nodes are absent (not infinite). An
/// unknown source yields an empty map.
#[must_use]
pub fn shortest_path_distances(graph: &Graph, source: &str) -> BTreeMap<String, usize> {
    let view = graph.indexed();
    let Some(s) = view.position(source) else {
        return BTreeMap::new();
    };

    bfs_hops(&view, s)
        .into_iter()
        .enumerate()
        .filter_map(|(v, d)| d.map(|d| (view.ids[v].to_string(), d)))
        .collect()
}

/// Hop distances from position `source`; `None` for unreachable nodes.
pub(crate) fn bfs_hops(view: &IndexedGraph<'_>, source: usize) -> Vec<Option<usize>> {
    let mut dist: Vec<Option<usize>> = vec![None; view.len()];
    dist[source] = Some(0);

    let mut queue = VecDeque::from([source]);
    while let Some(v) = queue.pop_front() {
        let next = dist[v].map_or(0, |d| d + 1);
        for &(w, _) in &view.adj[v] {
            if dist[w].is_none() {
                dist[w] = Some(next);
                queue.push_back(w);
            }
        }
    }

    dist
}

/// Mean hop distance from `source` to the other nodes it can reach.
///
/// `None` when nothing else is reachable.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn mean_hop_distance(view: &IndexedGraph<'_>, source: usize) -> Option<f64> {
    let (sum, count) = bfs_hops(view, source)
        .into_iter()
        .enumerate()
        .filter(|&(v, _)| v != source)
        .filter_map(|(_, d)| d)
        .fold((0usize, 0usize), |(sum, count), d| (sum + d, count + 1));

    (count > 0).then(|| sum as f64 / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::weighted::NodeAttrs;

    fn path_graph() -> Graph {
        // A — B — C — D, plus isolated E
        let mut g = Graph::new();
        g.add_edge("A", "B", 5);
        g.add_edge("B", "C", 1);
        g.add_edge("C", "D", 9);
        g.add_node("E", NodeAttrs::new());
        g
    }

    #[test]
    fn source_is_at_zero() {
        let d = shortest_path_distances(&path_graph(), "A");
        assert_eq!(d["A"], 0);
    }

    #[test]
    fn distances_are_hop_counts_not_weights() {
        let d = shortest_path_distances(&path_graph(), "A");
        assert_eq!(d["B"], 1);
        assert_eq!(d["C"], 2);
        assert_eq!(d["D"], 3);
    }

    #[test]
    fn unreachable_nodes_are_absent() {
        let d = shortest_path_distances(&path_graph(), "A");
        assert!(!d.contains_key("E"));
        assert_eq!(d.len(), 4);

        let iso = shortest_path_distances(&path_graph(), "E");
        assert_eq!(iso.len(), 1);
        assert_eq!(iso["E"], 0);
    }

    #[test]
    fn unknown_source_is_empty() {
        assert!(shortest_path_distances(&path_graph(), "Z").is_empty());
    }

    #[test]
    fn shortcut_wins_over_long_way() {
        let mut g = path_graph();
        g.add_edge("A", "D", 1);
        let d = shortest_path_distances(&g, "A");
        assert_eq!(d["D"], 1);
        assert_eq!(d["C"], 2);
    }

    #[test]
    fn mean_distance_excludes_source() {
        let g = path_graph();
        let view = g.indexed();
        let a = view.position("A").unwrap();
        let e = view.position("E").unwrap();
        // A reaches B, C, D at 1, 2, 3.
        assert_eq!(mean_hop_distance(&view, a), Some(2.0));
        assert_eq!(mean_hop_distance(&view, e), None);
    }
}
