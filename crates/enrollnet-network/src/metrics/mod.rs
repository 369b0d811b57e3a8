//! Centrality metrics for co-enrollment graphs.
//!
//! # Overview
//!
//! Each metric answers a different question about a student or course:
//!
//! - **Betweenness** (`betweenness`): Who sits on the shortest routes
//!   between everyone else?
//! - **Closeness** (`closeness`): How few hops, on average, to reach the
//!   rest of the component?
//! - **Eigenvector** (`eigenvector`): Who is tied, heavily, to other
//!   well-tied nodes?
//! - **Average separation** (`separation`): The raw mean hop distance that
//!   closeness inverts.
//!
//! Only eigenvector reads edge weights. The rest work on hop counts.
//!
//! # Usage
//!
//! All metrics take a [`Graph`](crate::graph::Graph) reference and return
//! scores keyed by node id, unrounded. Rounding happens in
//! [`crate::report::centrality`].
//!
//! ```rust
//! use enrollnet_network::graph::Graph;
//! use enrollnet_network::metrics::betweenness::betweenness_centrality;
//! use enrollnet_network::metrics::eigenvector::{EigenvectorConfig, eigenvector_centrality};
//!
//! let mut g = Graph::new();
//! g.add_edge("A1111", "B2222", 1);
//! g.add_edge("B2222", "C3333", 2);
//!
//! let bc = betweenness_centrality(&g);
//! let ev = eigenvector_centrality(&g, &EigenvectorConfig::default());
//! assert!(bc["B2222"] > bc["A1111"]);
//! assert_eq!(ev.scores.len(), 3);
//! ```

pub mod betweenness;
pub mod closeness;
pub mod eigenvector;
pub mod separation;
