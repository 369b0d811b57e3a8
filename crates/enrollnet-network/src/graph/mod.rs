//! Co-enrollment graphs.
//!
//! # Overview
//!
//! This module turns student records into undirected weighted graphs and
//! provides the hop-distance search every centrality metric relies on.
//!
//! ## Pipeline
//!
//! ```text
//! &[StudentRecord] + ExcludedCourses
//!        ↓  build::build_student_network() / build::build_course_network()
//! Graph (petgraph UnGraph, id-ordered)
//!        ↓  path::shortest_path_distances()
//! hop distances → crate::metrics
//! ```
//!
//! ## Typical Usage
//!
//! ```rust
//! use enrollnet_core::model::{ExcludedCourses, StudentRecord};
//! use enrollnet_network::graph::{build_student_network, shortest_path_distances};
//!
//! let students = vec![
//!     StudentRecord::new("A1111", ["SOCI 101", "PSYC 210"]),
//!     StudentRecord::new("B2222", ["PSYC 210", "ECON 101"]),
//! ];
//! let g = build_student_network(&students, &ExcludedCourses::default());
//! assert_eq!(g.edges(), vec![("A1111", "B2222", 1)]);
//! assert_eq!(shortest_path_distances(&g, "A1111")["B2222"], 1);
//! ```

pub mod build;
pub mod path;
pub mod weighted;

// Re-export primary types at module level for convenience.
pub use build::{build_course_network, build_student_network};
pub use path::shortest_path_distances;
pub use weighted::{Graph, NodeAttr, NodeAttrs};
