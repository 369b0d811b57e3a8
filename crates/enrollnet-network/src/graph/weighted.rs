//! Undirected weighted graph with per-node attributes.
//!
//! # Overview
//!
//! [`Graph`] wraps a petgraph `UnGraph` with a string id → index map so
//! callers address nodes by student id or course code. Edge weights are
//! positive integers (shared-course or shared-student counts).
//!
//! ## Invariants
//!
//! - `weight(u, v) == weight(v, u)`; each unordered pair has at most one edge.
//! - No self-loops: `add_edge(u, u, _)` is ignored.
//! - Every edge endpoint is a node (`add_edge` creates missing endpoints).
//!
//! ## Ordering
//!
//! Everything that iterates (nodes, edges, neighbors, the dense view used by
//! the metrics) is ordered by node id, so float accumulation happens in the
//! same order no matter how the graph was built.

#![allow(clippy::module_name_repetitions)]

use std::collections::BTreeMap;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use tracing::trace;

// ---------------------------------------------------------------------------
// Node attributes
// ---------------------------------------------------------------------------

/// Attribute names a node may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeAttr {
    /// Number of courses a student registered for (student graph).
    CourseCount,
    /// Number of students taking a course (course graph).
    Enrollment,
}

impl NodeAttr {
    /// Field name used in exported JSON.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::CourseCount => "course_count",
            Self::Enrollment => "enrollment",
        }
    }
}

/// Attribute set attached to a node.
pub type NodeAttrs = BTreeMap<NodeAttr, usize>;

#[derive(Debug, Clone)]
struct NodeData {
    id: String,
    attrs: NodeAttrs,
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// Undirected graph keyed by string ids with `u32` edge weights.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    inner: UnGraph<NodeData, u32>,
    index: BTreeMap<String, NodeIndex>,
}

impl Graph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, or replace the attributes of an existing one.
    pub fn add_node(&mut self, id: &str, attrs: NodeAttrs) {
        let idx = self.ensure_node(id);
        self.inner[idx].attrs = attrs;
    }

    /// Add or overwrite the edge `u — v`.
    ///
    /// Missing endpoints are created with no attributes. An existing edge
    /// takes the new weight (last write wins). Self-loops are ignored.
    pub fn add_edge(&mut self, u: &str, v: &str, weight: u32) {
        if u == v {
            trace!(node = u, "ignoring self-loop");
            return;
        }
        let a = self.ensure_node(u);
        let b = self.ensure_node(v);
        self.inner.update_edge(a, b, weight);
    }

    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Node ids in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.index.keys().map(String::as_str)
    }

    /// Every undirected edge exactly once as `(u, v, weight)` with `u < v`,
    /// sorted by `(u, v)`.
    #[must_use]
    pub fn edges(&self) -> Vec<(&str, &str, u32)> {
        let mut out: Vec<(&str, &str, u32)> = self
            .inner
            .edge_references()
            .map(|e| {
                let a = self.inner[e.source()].id.as_str();
                let b = self.inner[e.target()].id.as_str();
                if a <= b {
                    (a, b, *e.weight())
                } else {
                    (b, a, *e.weight())
                }
            })
            .collect();
        out.sort_unstable();
        out
    }

    /// Neighbor id → edge weight. Empty for unknown or isolated nodes.
    #[must_use]
    pub fn neighbors(&self, id: &str) -> BTreeMap<&str, u32> {
        let Some(&idx) = self.index.get(id) else {
            return BTreeMap::new();
        };
        self.inner
            .edges(idx)
            .map(|e| {
                let other = if e.source() == idx { e.target() } else { e.source() };
                (self.inner[other].id.as_str(), *e.weight())
            })
            .collect()
    }

    /// Weight of the edge `u — v`, if present.
    #[must_use]
    pub fn weight(&self, u: &str, v: &str) -> Option<u32> {
        let a = *self.index.get(u)?;
        let b = *self.index.get(v)?;
        self.inner.find_edge(a, b).map(|e| self.inner[e])
    }

    /// Attribute value, or 0 when the node or attribute is missing.
    #[must_use]
    pub fn attr(&self, id: &str, attr: NodeAttr) -> usize {
        self.attrs(id)
            .and_then(|attrs| attrs.get(&attr).copied())
            .unwrap_or(0)
    }

    #[must_use]
    pub fn attrs(&self, id: &str) -> Option<&NodeAttrs> {
        self.index.get(id).map(|&idx| &self.inner[idx].attrs)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Dense, id-ordered adjacency view for the metric kernels.
    pub(crate) fn indexed(&self) -> IndexedGraph<'_> {
        let n = self.node_count();
        let mut dense = vec![0usize; self.inner.node_count()];
        let mut ids = Vec::with_capacity(n);

        for (pos, (id, &idx)) in self.index.iter().enumerate() {
            dense[idx.index()] = pos;
            ids.push(id.as_str());
        }

        let adj = self
            .index
            .values()
            .map(|&idx| {
                let mut nbrs: Vec<(usize, f64)> = self
                    .inner
                    .edges(idx)
                    .map(|e| {
                        let other = if e.source() == idx { e.target() } else { e.source() };
                        (dense[other.index()], f64::from(*e.weight()))
                    })
                    .collect();
                nbrs.sort_unstable_by_key(|&(pos, _)| pos);
                nbrs
            })
            .collect();

        IndexedGraph { ids, adj }
    }

    fn ensure_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.inner.add_node(NodeData {
            id: id.to_string(),
            attrs: NodeAttrs::new(),
        });
        self.index.insert(id.to_string(), idx);
        idx
    }
}

// ---------------------------------------------------------------------------
// IndexedGraph
// ---------------------------------------------------------------------------

/// Graph flattened to positions `0..n` in ascending id order.
///
/// `adj[v]` lists `(neighbor position, weight)` sorted by position.
#[derive(Debug)]
pub(crate) struct IndexedGraph<'g> {
    pub ids: Vec<&'g str>,
    pub adj: Vec<Vec<(usize, f64)>>,
}

impl IndexedGraph<'_> {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids.binary_search(&id).ok()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
