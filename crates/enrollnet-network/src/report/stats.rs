//! Whole-network summary counts.
//!
//! - **total_students**: number of records.
//! - **total_courses**: distinct course codes across every record, excluded
//!   courses included.
//! - **avg_courses_per_student**: mean full course-list length, 2 decimal
//!   places; 0.0 with no students.
//! - **network_density**: student-graph edges over `n(n-1)/2`, 4 decimal
//!   places; 0.0 when `n <= 1`.
//! - **student_edges** / **course_edges**: edge counts of the two graphs.

use std::collections::BTreeSet;

use enrollnet_core::model::{ExcludedCourses, NetworkStatsSummary, StudentRecord};
use tracing::instrument;

use super::round_to;
use crate::graph::{Graph, build_course_network, build_student_network};

/// Build both graphs and summarize them.
#[must_use]
#[instrument(skip(students, excluded), fields(students = students.len()))]
pub fn network_stats(
    students: &[StudentRecord],
    excluded: &ExcludedCourses,
) -> NetworkStatsSummary {
    let student_graph = build_student_network(students, excluded);
    let course_graph = build_course_network(students, excluded);
    summarize(students, &student_graph, &course_graph)
}

/// Summary over graphs the caller already built from `students`.
pub(crate) fn summarize(
    students: &[StudentRecord],
    student_graph: &Graph,
    course_graph: &Graph,
) -> NetworkStatsSummary {
    let total_students = students.len();

    let total_courses = students
        .iter()
        .flat_map(|s| s.courses.iter().map(String::as_str))
        .collect::<BTreeSet<_>>()
        .len();

    let avg_courses_per_student = if total_students > 0 {
        let enrolled: usize = students.iter().map(|s| s.courses.len()).sum();
        #[allow(clippy::cast_precision_loss)]
        let avg = enrolled as f64 / total_students as f64;
        round_to(avg, 2)
    } else {
        0.0
    };

    NetworkStatsSummary {
        total_students,
        total_courses,
        avg_courses_per_student,
        network_density: round_to(density(student_graph), 4),
        student_edges: student_graph.edge_count(),
        course_edges: course_graph.edge_count(),
    }
}

/// Undirected density: `edges / (n(n-1)/2)`; 0.0 for 0 or 1 node.
#[allow(clippy::cast_precision_loss)]
fn density(graph: &Graph) -> f64 {
    let n = graph.node_count();
    if n <= 1 {
        return 0.0;
    }
    let max_edges = (n * (n - 1)) as f64 / 2.0;
    graph.edge_count() as f64 / max_edges
}
