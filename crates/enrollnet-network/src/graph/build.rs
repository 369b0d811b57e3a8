//! Network construction from student records.
//!
//! # Overview
//!
//! Two projections of the student–course bipartite data:
//!
//! - **Student network**: one node per student; an edge joins two students
//!   who share at least one counted course, weighted by the number of
//!   distinct counted courses they share.
//! - **Course network**: one node per counted course; an edge joins two
//!   courses taken together by at least one student, weighted by the number
//!   of distinct students taking both.
//!
//! ## Excluded Courses
//!
//! Courses in the [`ExcludedCourses`] set never produce edges in either
//! network and never become course nodes. A student's `course_count`
//! attribute still counts them: it is the length of the full registration.
//!
//! ## Repeated IDs
//!
//! Records sharing an ID are merged on the student side: the node keeps the
//! last record's `course_count` and rosters take the union of their courses.
//! Course enrollment counts every record. Course edges use one course list
//! per ID, the last record with a counted course.
//!
//! ## Ordering
//!
//! Rosters and pair counters are ordered maps and pair keys are stored as
//! `(smaller id, larger id)`, so the same records always produce the same
//! graph regardless of input order.

use std::collections::{BTreeMap, BTreeSet};

use enrollnet_core::model::{ExcludedCourses, StudentRecord};
use tracing::{debug, instrument};

use super::weighted::{Graph, NodeAttr, NodeAttrs};

/// Build the student co-enrollment network.
#[must_use]
#[instrument(skip(students, excluded), fields(students = students.len()))]
pub fn build_student_network(students: &[StudentRecord], excluded: &ExcludedCourses) -> Graph {
    let mut graph = Graph::new();

    for student in students {
        graph.add_node(
            &student.id,
            NodeAttrs::from([(NodeAttr::CourseCount, student.courses.len())]),
        );
    }

    // course → students enrolled in it
    let mut rosters: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for student in students {
        for course in student.counted_courses(excluded) {
            rosters.entry(course).or_default().insert(student.id.as_str());
        }
    }

    let mut pair_weights: BTreeMap<(&str, &str), u32> = BTreeMap::new();
    for roster in rosters.values() {
        count_pairs(roster.iter().copied(), &mut pair_weights);
    }

    for (&(a, b), &weight) in &pair_weights {
        graph.add_edge(a, b, weight);
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "student network built"
    );
    graph
}

/// Build the course co-enrollment network.
#[must_use]
#[instrument(skip(students, excluded), fields(students = students.len()))]
pub fn build_course_network(students: &[StudentRecord], excluded: &ExcludedCourses) -> Graph {
    let mut graph = Graph::new();

    let mut enrollment: BTreeMap<&str, usize> = BTreeMap::new();
    for student in students {
        for course in student.counted_courses(excluded) {
            *enrollment.entry(course).or_default() += 1;
        }
    }

    for (&course, &count) in &enrollment {
        graph.add_node(course, NodeAttrs::from([(NodeAttr::Enrollment, count)]));
    }

    let mut by_student: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for student in students {
        let courses: BTreeSet<&str> = student.counted_courses(excluded).collect();
        if !courses.is_empty() {
            by_student.insert(student.id.as_str(), courses);
        }
    }

    let mut pair_weights: BTreeMap<(&str, &str), u32> = BTreeMap::new();
    for courses in by_student.values() {
        count_pairs(courses.iter().copied(), &mut pair_weights);
    }

    for (&(a, b), &weight) in &pair_weights {
        graph.add_edge(a, b, weight);
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "course network built"
    );
    graph
}

/// Increment the counter of every unordered pair drawn from `members`.
///
/// `members` must be strictly ascending so each pair is keyed as
/// `(smaller, larger)`.
fn count_pairs<'a>(
    members: impl Iterator<Item = &'a str>,
    pair_weights: &mut BTreeMap<(&'a str, &'a str), u32>,
) {
    let members: Vec<&str> = members.collect();
    for (i, &a) in members.iter().enumerate() {
        for &b in &members[i + 1..] {
            *pair_weights.entry((a, b)).or_default() += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
