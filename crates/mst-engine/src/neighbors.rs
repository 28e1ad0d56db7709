//! Per-node k-nearest ranking for the candidate-edge backdrop.
//!
//! Independent of the spanning tree.  Every node is ranked against all
//! others by matrix distance and the first `k = clamp(k_max, 1, n - 1)` are
//! kept.  The UI later draws any shorter prefix depending on zoom, so lists
//! are always computed at the full `k`.

use mst_core::NodeIndex;

use crate::DistanceMatrix;

/// `clamp(k_max, 1, n - 1)`, or 0 when there is nobody to be a neighbour.
#[inline]
pub fn neighbor_count(k_max: usize, n: usize) -> usize {
    if n <= 1 { 0 } else { k_max.clamp(1, n - 1) }
}

/// `lists[i]` holds the `k` nearest other nodes to `i`, nearest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NeighborLists {
    lists: Vec<Vec<NodeIndex>>,
}

impl NeighborLists {
    /// Rank every row of `matrix`.  Equal distances keep ascending index
    /// order (stable sort), matching the order a linear scan sees them.
    pub fn k_nearest(matrix: &DistanceMatrix, k_max: usize) -> Self {
        let n = matrix.len();
        let k = neighbor_count(k_max, n);

        #[cfg(not(feature = "parallel"))]
        let lists = (0..n).map(|i| rank_row(matrix, i, k)).collect();

        #[cfg(feature = "parallel")]
        let lists = {
            use rayon::prelude::*;
            (0..n).into_par_iter().map(|i| rank_row(matrix, i, k)).collect()
        };

        Self { lists }
    }

    pub fn into_lists(self) -> Vec<Vec<NodeIndex>> {
        self.lists
    }

    pub fn as_lists(&self) -> &[Vec<NodeIndex>] {
        &self.lists
    }

    /// Number of nodes (not neighbours).
    #[inline]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Full list for `node`; empty if the node is unknown.
    pub fn of(&self, node: NodeIndex) -> &[NodeIndex] {
        self.lists.get(node.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The nearest `k` of `node`'s list (fewer if the list is shorter).
    pub fn prefix(&self, node: NodeIndex, k: usize) -> &[NodeIndex] {
        let all = self.of(node);
        &all[..k.min(all.len())]
    }
}

fn rank_row(matrix: &DistanceMatrix, i: usize, k: usize) -> Vec<NodeIndex> {
    let row = matrix.row(i);
    let mut ranked: Vec<(f64, usize)> = row
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != i)
        .map(|(j, &d)| (d, j))
        .collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked.truncate(k);
    ranked.into_iter().map(|(_, j)| NodeIndex::from_usize(j)).collect()
}
