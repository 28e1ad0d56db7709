//! Weighted undirected edges and the ordered spanning-tree edge list.

use mst_core::{NodeIndex, PairKey};

use crate::UnionFind;

/// One undirected edge.  `w` is the matrix distance between `u` and `v`,
/// copied verbatim and never recomputed.
///
/// Serialised as `{"u": .., "v": .., "w": ..}`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub u: NodeIndex,
    pub v: NodeIndex,
    pub w: f64,
}

impl Edge {
    #[inline]
    pub fn new(u: NodeIndex, v: NodeIndex, w: f64) -> Self {
        Self { u, v, w }
    }

    /// Canonical geometry-cache key for this edge's endpoints.
    #[inline]
    pub fn key(&self) -> PairKey {
        PairKey::new(self.u, self.v)
    }
}

// ── SpanningTree ──────────────────────────────────────────────────────────────

/// Spanning-tree edges in the order the algorithm accepted them.
///
/// The order is the animation playback order: Prim emits discovery order,
/// Kruskal emits ascending-weight acceptance order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SpanningTree {
    edges: Vec<Edge>,
}

impl SpanningTree {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_edges(edges: Vec<Edge>) -> Self {
        Self { edges }
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    /// Sum of edge weights (the "MST total length").
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.w).sum()
    }

    /// `true` if the edges form one acyclic tree touching all `node_count`
    /// nodes.  Zero or one node is spanned by the empty tree.
    pub fn spans(&self, node_count: usize) -> bool {
        if self.edges.len() != node_count.saturating_sub(1) {
            return false;
        }
        let mut uf = UnionFind::new(node_count);
        self.edges.iter().all(|e| {
            e.u.index() < node_count && e.v.index() < node_count && uf.union(e.u.0, e.v.0)
        })
    }
}

impl<'a> IntoIterator for &'a SpanningTree {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
