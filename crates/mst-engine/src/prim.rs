//! Prim's algorithm, dense O(n²) variant.
//!
//! Always grows from node 0.  Each round a linear scan picks the closest
//! node not yet in the tree; on ties the lowest index wins because the scan
//! only replaces its best on a strictly smaller distance.  That makes the
//! emitted edge order (the animation order) fully reproducible.

use mst_core::NodeIndex;

use crate::{DistanceMatrix, Edge, SpanningTree, SpanningTreeBuilder};

/// [`SpanningTreeBuilder`] running [`prim`].
#[derive(Copy, Clone, Debug, Default)]
pub struct Prim;

impl SpanningTreeBuilder for Prim {
    fn build(&self, matrix: &DistanceMatrix) -> SpanningTree {
        prim(matrix)
    }
}

/// Minimum spanning tree of the complete graph described by `matrix`, in
/// discovery order.  Each emitted edge is `(parent, node, min_dist[node])`.
pub fn prim(matrix: &DistanceMatrix) -> SpanningTree {
    let n = matrix.len();
    if n <= 1 {
        return SpanningTree::empty();
    }

    let mut min_dist = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut in_tree = vec![false; n];
    let mut edges = Vec::with_capacity(n - 1);

    min_dist[0] = 0.0;

    for _ in 0..n {
        let mut best = f64::INFINITY;
        let mut pick = None;
        for (i, &d) in min_dist.iter().enumerate() {
            if !in_tree[i] && d < best {
                best = d;
                pick = Some(i);
            }
        }
        // Unreachable on a complete finite graph; kept for malformed input.
        let Some(u) = pick else { break };

        in_tree[u] = true;
        if let Some(p) = parent[u] {
            edges.push(Edge::new(NodeIndex::from_usize(p), NodeIndex::from_usize(u), best));
        }

        let row = matrix.row(u);
        for v in 0..n {
            if in_tree[v] {
                continue;
            }
            if row[v] < min_dist[v] {
                min_dist[v] = row[v];
                parent[v] = Some(u);
            }
        }
    }

    SpanningTree::from_edges(edges)
}
