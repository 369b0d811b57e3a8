//! Aggregates over both co-enrollment graphs: whole-network stats, the
//! thresholded export for force-directed rendering, and the per-node
//! centrality bundle the registry store caches.

pub mod centrality;
pub mod export;
pub mod stats;

pub use centrality::{
    FullCentrality, NetworkEngine, cached_centrality, calculate_centralities, full_centrality,
};
pub use export::{
    CourseNode, Link, NetworkExport, StudentNode, course_network_export, student_network_export,
};
pub use stats::network_stats;

/// Round to `places` decimal places, half to even on the exact binary value.
///
/// Float formatting is correctly rounded, so `1.125` (exact in binary) becomes
/// `1.12` while `0.665` (stored just below the tie) becomes `0.66`.
pub(crate) fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}
