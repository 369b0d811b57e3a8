//! Average separation: mean hop distance to every reachable node.
//!
//! The raw mean behind [`super::closeness`], which reports its reciprocal.

use std::collections::BTreeMap;

use tracing::instrument;

use crate::graph::Graph;
use crate::graph::path::mean_hop_distance;

/// Mean hop distance from each node to the others it can reach; 0.0 when
/// it reaches none.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn average_separation(graph: &Graph) -> BTreeMap<String, f64> {
    let view = graph.indexed();

    (0..view.len())
        .map(|v| {
            let mean = mean_hop_distance(&view, v).unwrap_or(0.0);
            (view.ids[v].to_string(), mean)
        })
        .collect()
}
