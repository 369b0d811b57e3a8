//! Centrality and summary result types.
//!
//! These are produced by `enrollnet-network` and cached verbatim by the
//! registry store, so they live here where both sides can see them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-node centrality scores, already rounded for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct NodeCentrality {
    /// Normalized betweenness, 4 decimal places.
    pub betweenness: f64,
    /// Inverse of the mean hop distance to reachable nodes, 4 decimal places.
    pub closeness: f64,
    /// Power-iteration eigenvector score, 4 decimal places.
    pub eigenvector: f64,
    /// Mean hop distance to reachable nodes, 2 decimal places.
    pub avg_separation: f64,
}

/// Node id → scores, ordered by id.
pub type CentralityResult = BTreeMap<String, NodeCentrality>;

/// Whole-network counts for the overview panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct NetworkStatsSummary {
    pub total_students: usize,
    /// Distinct course codes across all records, excluded courses included.
    pub total_courses: usize,
    pub avg_courses_per_student: f64,
    /// Student-graph density.
    pub network_density: f64,
    pub student_edges: usize,
    pub course_edges: usize,
}

/// The centrality pair the registry store keeps alongside the records.
///
/// Overwritten wholesale on every registration change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CachedCentrality {
    #[serde(default)]
    pub students: CentralityResult,
    #[serde(default)]
    pub courses: CentralityResult,
}

impl CachedCentrality {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty() && self.courses.is_empty()
    }
}
