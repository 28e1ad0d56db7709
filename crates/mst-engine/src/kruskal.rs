//! Kruskal's algorithm over the complete graph.
//!
//! Builds all `n(n-1)/2` candidate edges (`u < v`), sorts them by weight,
//! and accepts each edge whose endpoints are still in different sets.
//! Stops after `n - 1` acceptances.
//!
//! The sort is unstable: on equal weights the acceptance order (and so
//! the animation order) is whatever the sort yields.  Tree weight is
//! unaffected.

use mst_core::NodeIndex;

use crate::{DistanceMatrix, Edge, SpanningTree, SpanningTreeBuilder, UnionFind};

/// [`SpanningTreeBuilder`] running [`kruskal`].
#[derive(Copy, Clone, Debug, Default)]
pub struct Kruskal;

impl SpanningTreeBuilder for Kruskal {
    fn build(&self, matrix: &DistanceMatrix) -> SpanningTree {
        kruskal(matrix)
    }
}

/// Minimum spanning tree of the complete graph described by `matrix`, in
/// ascending-weight acceptance order.
pub fn kruskal(matrix: &DistanceMatrix) -> SpanningTree {
    let n = matrix.len();
    if n <= 1 {
        return SpanningTree::empty();
    }

    let mut candidates = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        let row = matrix.row(i);
        for (j, &w) in row.iter().enumerate().skip(i + 1) {
            candidates.push(Edge::new(NodeIndex::from_usize(i), NodeIndex::from_usize(j), w));
        }
    }
    candidates.sort_unstable_by(|a, b| a.w.total_cmp(&b.w));

    let mut uf = UnionFind::new(n);
    let mut edges = Vec::with_capacity(n - 1);
    for edge in candidates {
        if uf.union(edge.u.0, edge.v.0) {
            edges.push(edge);
            if edges.len() == n - 1 {
                break;
            }
        }
    }

    SpanningTree::from_edges(edges)
}
