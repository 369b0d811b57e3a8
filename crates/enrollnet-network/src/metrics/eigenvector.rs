//! Eigenvector centrality via power iteration.
//!
//! # Overview
//!
//! Eigenvector centrality scores nodes based on the idea that connections to
//! high-scoring nodes contribute more to a node's score. It approximates the
//! dominant eigenvector of the weighted adjacency matrix.
//!
//! # Algorithm
//!
//! 1. Initialize every score to `1/n`.
//! 2. For each node `v`: `score(v) = Σ prev(u) * w(u, v)` over neighbors `u`.
//!    All nodes read the previous vector, never a partially updated one.
//! 3. Normalize the score vector to unit L2 norm (skipped when the norm is 0).
//! 4. Stop once the L1 change from the previous vector is below the
//!    tolerance, or after `max_iter` iterations.
//!
//! Isolated nodes have nothing to sum and score 0.0 after the first
//! iteration. Hitting the cap is not an error: whatever vector was reached
//! is returned and [`EigenvectorResult::converged`] is `false`.
//!
//! Neighbor sums run in ascending id order so repeated runs agree bit for
//! bit.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

pub use enrollnet_core::config::EigenvectorConfig;

use crate::graph::Graph;

/// Result of eigenvector centrality computation.
#[derive(Debug, Clone)]
pub struct EigenvectorResult {
    /// Eigenvector centrality scores: node id → score.
    pub scores: BTreeMap<String, f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the L1 change dropped below the tolerance within `max_iter`.
    pub converged: bool,
}

/// Compute eigenvector centrality for all nodes.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn eigenvector_centrality(graph: &Graph, config: &EigenvectorConfig) -> EigenvectorResult {
    let view = graph.indexed();
    let n = view.len();

    if n == 0 {
        return EigenvectorResult {
            scores: BTreeMap::new(),
            iterations: 0,
            converged: true,
        };
    }

    #[allow(clippy::cast_precision_loss)]
    let init_val = 1.0 / n as f64;
    let mut scores: Vec<f64> = vec![init_val; n];

    let mut converged = false;
    let mut iterations = 0;

    for iter in 0..config.max_iter {
        iterations = iter + 1;

        let mut new_scores: Vec<f64> = view
            .adj
            .iter()
            .map(|nbrs| nbrs.iter().map(|&(u, w)| scores[u] * w).sum())
            .collect();

        // Normalize to unit L2 norm.
        let norm: f64 = new_scores.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            for x in &mut new_scores {
                *x /= norm;
            }
        }

        // L1 change across all nodes.
        let diff: f64 = scores
            .iter()
            .zip(new_scores.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();

        scores = new_scores;

        if diff < config.tolerance {
            converged = true;
            break;
        }
    }

    debug!(iterations, converged, "eigenvector iteration finished");

    EigenvectorResult {
        scores: view
            .ids
            .iter()
            .zip(scores)
            .map(|(id, score)| ((*id).to_string(), score))
            .collect(),
        iterations,
        converged,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
