//! Per-node centrality bundles.
//!
//! [`calculate_centralities`] runs every metric over one graph and rounds
//! for presentation: 4 decimal places for betweenness, closeness and
//! eigenvector; 2 for average separation.
//!
//! [`full_centrality`] does that for both graphs and adds the overview.
//! [`NetworkEngine`] is the same computation behind the registry store's
//! [`CentralityProvider`] seam.

use std::collections::BTreeMap;

use enrollnet_core::config::{EigenvectorConfig, ProjectConfig};
use enrollnet_core::model::{
    CachedCentrality, CentralityResult, ExcludedCourses, NetworkStatsSummary, NodeCentrality,
    StudentRecord,
};
use enrollnet_core::store::CentralityProvider;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::round_to;
use super::stats::summarize;
use crate::graph::{Graph, build_course_network, build_student_network};
use crate::metrics::betweenness::betweenness_centrality;
use crate::metrics::closeness::closeness_centrality;
use crate::metrics::eigenvector::eigenvector_centrality;
use crate::metrics::separation::average_separation;

/// Overview plus both centrality maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FullCentrality {
    pub overview: NetworkStatsSummary,
    pub student_centralities: CentralityResult,
    pub course_centralities: CentralityResult,
}

/// Run all four metrics over `graph` and round the results.
///
/// An empty graph yields an empty result.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn calculate_centralities(graph: &Graph, eigen: &EigenvectorConfig) -> CentralityResult {
    if graph.is_empty() {
        return CentralityResult::new();
    }

    let betweenness = betweenness_centrality(graph);
    let closeness = closeness_centrality(graph);
    let eigenvector = eigenvector_centrality(graph, eigen);
    let separation = average_separation(graph);

    if !eigenvector.converged {
        warn!(
            iterations = eigenvector.iterations,
            "eigenvector centrality hit the iteration cap without converging"
        );
    }

    let score = |map: &BTreeMap<String, f64>, id: &str| map.get(id).copied().unwrap_or(0.0);

    graph
        .nodes()
        .map(|id| {
            let scores = NodeCentrality {
                betweenness: round_to(score(&betweenness, id), 4),
                closeness: round_to(score(&closeness, id), 4),
                eigenvector: round_to(score(&eigenvector.scores, id), 4),
                avg_separation: round_to(score(&separation, id), 2),
            };
            (id.to_string(), scores)
        })
        .collect()
}

/// Overview and per-node centralities for both co-enrollment graphs.
#[must_use]
#[instrument(skip_all, fields(students = students.len()))]
pub fn full_centrality(
    students: &[StudentRecord],
    excluded: &ExcludedCourses,
    eigen: &EigenvectorConfig,
) -> FullCentrality {
    let student_graph = build_student_network(students, excluded);
    let course_graph = build_course_network(students, excluded);

    FullCentrality {
        overview: summarize(students, &student_graph, &course_graph),
        student_centralities: calculate_centralities(&student_graph, eigen),
        course_centralities: calculate_centralities(&course_graph, eigen),
    }
}

/// The pair the registry store persists; empty maps with no students.
#[must_use]
#[instrument(skip_all, fields(students = students.len()))]
pub fn cached_centrality(
    students: &[StudentRecord],
    excluded: &ExcludedCourses,
    eigen: &EigenvectorConfig,
) -> CachedCentrality {
    if students.is_empty() {
        return CachedCentrality::default();
    }

    let cached = CachedCentrality {
        students: calculate_centralities(&build_student_network(students, excluded), eigen),
        courses: calculate_centralities(&build_course_network(students, excluded), eigen),
    };
    info!(
        students = cached.students.len(),
        courses = cached.courses.len(),
        "centrality recomputed"
    );
    cached
}

/// Centrality settings bound together for repeated recomputation.
#[derive(Debug, Clone, Default)]
pub struct NetworkEngine {
    pub excluded: ExcludedCourses,
    pub eigenvector: EigenvectorConfig,
}

impl NetworkEngine {
    #[must_use]
    pub const fn new(excluded: ExcludedCourses, eigenvector: EigenvectorConfig) -> Self {
        Self {
            excluded,
            eigenvector,
        }
    }

    #[must_use]
    pub fn from_config(config: &ProjectConfig) -> Self {
        Self::new(config.network.excluded_courses.clone(), config.eigenvector)
    }

    #[must_use]
    pub fn full_centrality(&self, students: &[StudentRecord]) -> FullCentrality {
        full_centrality(students, &self.excluded, &self.eigenvector)
    }
}

impl CentralityProvider for NetworkEngine {
    fn recompute(&self, students: &[StudentRecord]) -> CachedCentrality {
        cached_centrality(students, &self.excluded, &self.eigenvector)
    }

    fn settings_fingerprint(&self) -> String {
        let excluded: Vec<&str> = self.excluded.iter().collect();
        format!(
            "excluded={};max_iter={};tolerance={:?}",
            excluded.join(","),
            self.eigenvector.max_iter,
            self.eigenvector.tolerance,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeAttrs;

    fn scenario() -> Vec<StudentRecord> {
        vec![
            StudentRecord::new("A1111", ["SOCI 101", "PSYC 210"]),
            StudentRecord::new("B2222", ["PSYC 210", "ECON 101"]),
        ]
    }

    #[test]
    fn empty_graph_has_no_scores() {
        assert!(calculate_centralities(&Graph::new(), &EigenvectorConfig::default()).is_empty());
    }

    #[test]
    fn isolated_node_scores_are_all_zero() {
        let mut g = Graph::new();
        g.add_edge("A", "B", 1);
        g.add_node("C", NodeAttrs::new());
        let result = calculate_centralities(&g, &EigenvectorConfig::default());
        assert_eq!(result["C"], NodeCentrality::default());
    }

    #[test]
    fn path_of_three_rounded_scores() {
        let mut g = Graph::new();
        g.add_edge("A", "B", 1);
        g.add_edge("B", "C", 1);
        let result = calculate_centralities(&g, &EigenvectorConfig::default());

        assert_eq!(result["B"].betweenness, 2.0);
        assert_eq!(result["B"].closeness, 1.0);
        assert_eq!(result["A"].closeness, 0.6667);
        assert_eq!(result["A"].avg_separation, 1.5);
        assert_eq!(result["B"].avg_separation, 1.0);
    }

    #[test]
    fn separation_tie_rounds_to_even() {
        // A - B - ... - I: B's distances are 1, 1, 2, ..., 7, mean 29/8 = 3.625.
        let ids = ["A", "B", "C", "D", "E", "F", "G", "H", "I"];
        let mut g = Graph::new();
        for pair in ids.windows(2) {
            g.add_edge(pair[0], pair[1], 1);
        }
        let result = calculate_centralities(&g, &EigenvectorConfig::default());
        assert_eq!(result["B"].avg_separation, 3.62);
        assert_eq!(result["A"].avg_separation, 4.5);
    }

    #[test]
    fn pair_eigenvector_rounds_to_unit_vector_component() {
        let result = full_centrality(
            &scenario(),
            &ExcludedCourses::default(),
            &EigenvectorConfig::default(),
        );
        for id in ["A1111", "B2222"] {
            let nc = result.student_centralities[id];
            assert_eq!(nc.eigenvector, 0.7071, "{id}");
            assert_eq!(nc.closeness, 1.0);
            assert_eq!(nc.betweenness, 0.0);
            assert_eq!(nc.avg_separation, 1.0);
        }
    }

    #[test]
    fn full_centrality_covers_both_graphs() {
        let result = full_centrality(
            &scenario(),
            &ExcludedCourses::default(),
            &EigenvectorConfig::default(),
        );
        assert_eq!(result.overview.total_students, 2);
        assert_eq!(result.overview.total_courses, 3);
        assert_eq!(
            result.student_centralities.keys().collect::<Vec<_>>(),
            ["A1111", "B2222"]
        );
        assert_eq!(
            result.course_centralities.keys().collect::<Vec<_>>(),
            ["ECON 101", "PSYC 210"]
        );
    }

    #[test]
    fn cached_centrality_is_empty_without_students() {
        let cached = cached_centrality(
            &[],
            &ExcludedCourses::default(),
            &EigenvectorConfig::default(),
        );
        assert!(cached.is_empty());
    }

    #[test]
    fn engine_matches_free_functions() {
        let engine = NetworkEngine::default();
        let cached = engine.recompute(&scenario());
        let full = engine.full_centrality(&scenario());
        assert_eq!(cached.students, full.student_centralities);
        assert_eq!(cached.courses, full.course_centralities);
    }

    #[test]
    fn fingerprint_tracks_every_setting() {
        let base = NetworkEngine::default();
        let fp = base.settings_fingerprint();
        assert!(fp.starts_with("excluded=SOCI 101;max_iter=100;tolerance="), "{fp}");

        let open = NetworkEngine::new(ExcludedCourses::none(), EigenvectorConfig::default());
        assert_ne!(open.settings_fingerprint(), base.settings_fingerprint());

        let capped = NetworkEngine::new(
            ExcludedCourses::default(),
            EigenvectorConfig {
                max_iter: 25,
                ..EigenvectorConfig::default()
            },
        );
        assert_ne!(capped.settings_fingerprint(), base.settings_fingerprint());
    }

    #[test]
    fn engine_from_config_honours_exclusions() {
        let mut config = ProjectConfig::default();
        config.network.excluded_courses = ExcludedCourses::none();
        let engine = NetworkEngine::from_config(&config);
        let cached = engine.recompute(&scenario());
        assert!(cached.courses.contains_key("SOCI 101"));
    }
}
