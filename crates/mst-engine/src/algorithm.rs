//! Algorithm selection.

use std::fmt;
use std::str::FromStr;

use crate::{DistanceMatrix, Kruskal, Prim, SpanningTree};

/// A spanning-tree construction strategy.
///
/// Implemented by [`Prim`] and [`Kruskal`]; callers that want to plug in
/// their own ordering (e.g. a different root) implement it too.
pub trait SpanningTreeBuilder: Send + Sync {
    /// Build the tree.  Must return exactly `max(0, n - 1)` edges for a
    /// complete matrix, in playback order.
    fn build(&self, matrix: &DistanceMatrix) -> SpanningTree;
}

/// The two built-in algorithms, as selected in a compute request.
///
/// Serialised as the lowercase strings `"prim"` and `"kruskal"`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    #[default]
    Prim,
    Kruskal,
}

impl Algorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Prim => "prim",
            Algorithm::Kruskal => "kruskal",
        }
    }

    /// Run the selected algorithm.
    pub fn run(self, matrix: &DistanceMatrix) -> SpanningTree {
        let tree = match self {
            Algorithm::Prim => Prim.build(matrix),
            Algorithm::Kruskal => Kruskal.build(matrix),
        };
        log::trace!("{self}: {} edges over {} nodes", tree.len(), matrix.len());
        tree
    }
}

impl SpanningTreeBuilder for Algorithm {
    fn build(&self, matrix: &DistanceMatrix) -> SpanningTree {
        self.run(matrix)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prim" => Ok(Algorithm::Prim),
            "kruskal" => Ok(Algorithm::Kruskal),
            other => Err(format!("unknown algorithm {other:?}: expected \"prim\" or \"kruskal\"")),
        }
    }
}
