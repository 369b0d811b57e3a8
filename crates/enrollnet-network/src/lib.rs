#![forbid(unsafe_code)]
//! enrollnet-network library.
//!
//! Builds student and course co-enrollment graphs from registration
//! records and scores every node by betweenness, closeness, eigenvector
//! centrality and average separation.
//!
//! # Conventions
//!
//! - **Purity**: Nothing here performs I/O. Degenerate input (no records,
//!   isolated nodes, disconnected graphs) yields degenerate values, never
//!   an error.
//! - **Ordering**: Node iteration is always in ascending id order, so the
//!   same records give bit-identical scores.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod graph;
pub mod metrics;
pub mod report;

pub use graph::{Graph, NodeAttr, build_course_network, build_student_network};
pub use report::{
    FullCentrality, NetworkEngine, cached_centrality, calculate_centralities,
    course_network_export, full_centrality, network_stats, student_network_export,
};
