//! Node/link export for force-directed rendering.
//!
//! Every node is emitted; links below `min_edge_weight` are dropped so
//! dense graphs stay drawable while isolated students stay visible.
//!
//! ```json
//! {
//!   "nodes": [{"id": "A1111", "course_count": 4}],
//!   "links": [{"source": "A1111", "target": "B2222", "weight": 2}]
//! }
//! ```

use enrollnet_core::model::{ExcludedCourses, StudentRecord};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::graph::{Graph, NodeAttr, build_course_network, build_student_network};

/// Default link threshold for the student export.
pub const DEFAULT_STUDENT_MIN_EDGE_WEIGHT: u32 = 2;

/// Default link threshold for the course export.
pub const DEFAULT_COURSE_MIN_EDGE_WEIGHT: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentNode {
    pub id: String,
    pub course_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseNode {
    pub id: String,
    pub enrollment: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub source: String,
    pub target: String,
    pub weight: u32,
}

/// Nodes in id order, links in `(source, target)` order with `source < target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkExport<N> {
    pub nodes: Vec<N>,
    pub links: Vec<Link>,
}

/// Export the student network.
#[must_use]
#[instrument(skip(students, excluded), fields(students = students.len()))]
pub fn student_network_export(
    students: &[StudentRecord],
    excluded: &ExcludedCourses,
    min_edge_weight: u32,
) -> NetworkExport<StudentNode> {
    let graph = build_student_network(students, excluded);
    export(&graph, min_edge_weight, |id| StudentNode {
        id: id.to_string(),
        course_count: graph.attr(id, NodeAttr::CourseCount),
    })
}

/// Export the course network.
#[must_use]
#[instrument(skip(students, excluded), fields(students = students.len()))]
pub fn course_network_export(
    students: &[StudentRecord],
    excluded: &ExcludedCourses,
    min_edge_weight: u32,
) -> NetworkExport<CourseNode> {
    let graph = build_course_network(students, excluded);
    export(&graph, min_edge_weight, |id| CourseNode {
        id: id.to_string(),
        enrollment: graph.attr(id, NodeAttr::Enrollment),
    })
}

fn export<N>(graph: &Graph, min_edge_weight: u32, node: impl Fn(&str) -> N) -> NetworkExport<N> {
    let nodes: Vec<N> = graph.nodes().map(node).collect();

    let links: Vec<Link> = graph
        .edges()
        .into_iter()
        .filter(|&(_, _, weight)| weight >= min_edge_weight)
        .map(|(source, target, weight)| Link {
            source: source.to_string(),
            target: target.to_string(),
            weight,
        })
        .collect();

    debug!(
        nodes = nodes.len(),
        links = links.len(),
        dropped = graph.edge_count() - links.len(),
        "network exported"
    );

    NetworkExport { nodes, links }
}
