//! Known-topology regression tests for centrality metrics.
//!
//! Each test uses a hand-crafted graph with known properties. Expected
//! values are computed by hand and hardcoded, so any algorithm change that
//! shifts a score is caught here.

use enrollnet_network::graph::{Graph, NodeAttrs, shortest_path_distances};
use enrollnet_network::metrics::betweenness::betweenness_centrality;
use enrollnet_network::metrics::closeness::closeness_centrality;
use enrollnet_network::metrics::eigenvector::{EigenvectorConfig, eigenvector_centrality};
use enrollnet_network::metrics::separation::average_separation;
use enrollnet_network::report::calculate_centralities;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_graph(edges: &[(&str, &str)]) -> Graph {
    let mut g = Graph::new();
    for (a, b) in edges {
        g.add_edge(a, b, 1);
    }
    g
}

fn build_graph_with_isolated(nodes: &[&str], edges: &[(&str, &str)]) -> Graph {
    let mut g = build_graph(edges);
    for id in nodes {
        if !g.contains_node(id) {
            g.add_node(id, NodeAttrs::new());
        }
    }
    g
}

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "{what}: expected {expected}, got {actual}"
    );
}

// ===========================================================================
// Topology 1: Chain
//
//   A — B — C — D
//
// Properties:
//   - Bipartite but mirror-symmetric, so power iteration still converges.
//   - Eigenvector is (1, φ, φ, 1) normalized, φ = golden ratio.
// ===========================================================================

#[test]
fn chain_hop_distances() {
    let g = build_graph(&[("A", "B"), ("B", "C"), ("C", "D")]);
    let dist = shortest_path_distances(&g, "A");

    assert_eq!(dist["A"], 0);
    assert_eq!(dist["B"], 1);
    assert_eq!(dist["C"], 2);
    assert_eq!(dist["D"], 3);
}

#[test]
fn chain_betweenness() {
    let g = build_graph(&[("A", "B"), ("B", "C"), ("C", "D")]);
    let bc = betweenness_centrality(&g);

    assert_close(bc["A"], 0.0, "A");
    assert_close(bc["B"], 4.0 / 3.0, "B");
    assert_close(bc["C"], 4.0 / 3.0, "C");
    assert_close(bc["D"], 0.0, "D");
}

#[test]
fn chain_closeness_and_separation() {
    let g = build_graph(&[("A", "B"), ("B", "C"), ("C", "D")]);
    let cc = closeness_centrality(&g);
    let sep = average_separation(&g);

    assert_close(cc["A"], 0.5, "closeness A");
    assert_close(cc["B"], 0.75, "closeness B");
    assert_close(sep["A"], 2.0, "separation A");
    assert_close(sep["B"], 4.0 / 3.0, "separation B");
}

#[test]
fn chain_eigenvector_golden_ratio() {
    let g = build_graph(&[("A", "B"), ("B", "C"), ("C", "D")]);
    let ev = eigenvector_centrality(&g, &EigenvectorConfig::default());

    assert!(ev.converged, "symmetric chain should converge");
    assert_close(ev.scores["A"], 0.371_748, "A");
    assert_close(ev.scores["B"], 0.601_501, "B");
    assert_close(ev.scores["C"], ev.scores["B"], "C mirrors B");
}

// ===========================================================================
// Topology 2: Bridged triangles
//
//   A       E
//   | \   / |
//   |  C—D  |
//   | /   \ |
//   B       F
//
// Properties:
//   - C and D carry every path between the two triangles.
//   - Converges to scores 1/2 for C, D and 1/(2√2) for the rest.
// ===========================================================================

fn bridged_triangles() -> Graph {
    build_graph(&[
        ("A", "B"),
        ("B", "C"),
        ("A", "C"),
        ("C", "D"),
        ("D", "E"),
        ("E", "F"),
        ("D", "F"),
    ])
}

#[test]
fn bridge_betweenness() {
    // C: {A, B} × {D, E, F} = 6 pairs, both directions = 12.
    // Scaled by 2 / (5 * 4) = 1.2.
    let bc = betweenness_centrality(&bridged_triangles());

    assert_close(bc["C"], 1.2, "C");
    assert_close(bc["D"], 1.2, "D");
    for id in ["A", "B", "E", "F"] {
        assert_close(bc[id], 0.0, id);
    }
}

#[test]
fn bridge_closeness() {
    let cc = closeness_centrality(&bridged_triangles());

    // C: 1 + 1 + 1 + 2 + 2 = 7 over 5 nodes.
    assert_close(cc["C"], 5.0 / 7.0, "C");
    // A: 1 + 1 + 2 + 3 + 3 = 10 over 5 nodes.
    assert_close(cc["A"], 0.5, "A");
}

#[test]
fn bridge_eigenvector() {
    let ev = eigenvector_centrality(&bridged_triangles(), &EigenvectorConfig::default());

    assert!(ev.converged);
    assert_close(ev.scores["C"], 0.5, "C");
    assert_close(ev.scores["D"], 0.5, "D");
    assert_close(ev.scores["A"], 1.0 / (2.0 * 2_f64.sqrt()), "A");
}

#[test]
fn bridge_rounded_bundle() {
    let result = calculate_centralities(&bridged_triangles(), &EigenvectorConfig::default());

    assert_eq!(result["C"].betweenness, 1.2);
    assert_eq!(result["C"].closeness, 0.7143);
    assert_eq!(result["C"].eigenvector, 0.5);
    assert_eq!(result["C"].avg_separation, 1.4);
    assert_eq!(result["A"].eigenvector, 0.3536);
    assert_eq!(result["A"].avg_separation, 2.0);
}

// ===========================================================================
// Topology 3: Star
//
//       A
//       |
//   B — C — D
//       |
//       E
//
// Properties:
//   - C lies between every pair of leaves.
//   - Bipartite and not mirror-symmetric: power iteration alternates between
//     a hub-heavy vector and the uniform one and never settles.
// ===========================================================================

fn star() -> Graph {
    build_graph(&[("C", "A"), ("C", "B"), ("C", "D"), ("C", "E")])
}

#[test]
fn star_betweenness_and_closeness() {
    let g = star();
    let bc = betweenness_centrality(&g);
    let cc = closeness_centrality(&g);

    assert_close(bc["C"], 2.0, "center betweenness");
    assert_close(cc["C"], 1.0, "center closeness");
    // Leaf: 1 + 2 + 2 + 2 = 7 over 4 nodes.
    assert_close(cc["A"], 4.0 / 7.0, "leaf closeness");
}

#[test]
fn star_eigenvector_runs_to_cap() {
    let ev = eigenvector_centrality(&star(), &EigenvectorConfig::default());

    assert!(!ev.converged);
    assert_eq!(ev.iterations, 100);
    // An even cap lands on the uniform half of the cycle.
    for id in ["A", "B", "C", "D", "E"] {
        assert_close(ev.scores[id], 1.0 / 5_f64.sqrt(), id);
    }
}

#[test]
fn star_eigenvector_odd_cap_favours_center() {
    let ev = eigenvector_centrality(
        &star(),
        &EigenvectorConfig {
            max_iter: 99,
            tolerance: 1e-6,
        },
    );

    assert!(!ev.converged);
    assert!(ev.scores["C"] > ev.scores["A"]);
    assert_close(ev.scores["C"], 4.0 / 20_f64.sqrt(), "center");
}

// ===========================================================================
// Topology 4: Disconnected with isolated node
//
//   A — B     C — D — E     F
// ===========================================================================

#[test]
fn disconnected_components_are_scored_independently() {
    let g = build_graph_with_isolated(&["F"], &[("A", "B"), ("C", "D"), ("D", "E")]);
    let result = calculate_centralities(&g, &EigenvectorConfig::default());

    assert_eq!(result.len(), 6);
    assert_eq!(result["A"].closeness, 1.0);
    assert_eq!(result["A"].betweenness, 0.0);
    assert_eq!(result["D"].closeness, 1.0);
    // D is between C and E: raw 2, scaled by 2 / (5 * 4).
    assert_eq!(result["D"].betweenness, 0.2);
    assert_eq!(result["C"].avg_separation, 1.5);

    let f = result["F"];
    assert_eq!(f.betweenness, 0.0);
    assert_eq!(f.closeness, 0.0);
    assert_eq!(f.eigenvector, 0.0);
    assert_eq!(f.avg_separation, 0.0);
}

#[test]
fn distances_stay_inside_component() {
    let g = build_graph_with_isolated(&["F"], &[("A", "B"), ("C", "D")]);
    let dist = shortest_path_distances(&g, "A");

    assert_eq!(dist.len(), 2);
    assert!(!dist.contains_key("C"));
    assert!(shortest_path_distances(&g, "F").len() == 1);
    assert!(shortest_path_distances(&g, "missing").is_empty());
}
