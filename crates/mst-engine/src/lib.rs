//! `mst-engine`: spanning trees and nearest-neighbour ranking over a dense
//! great-circle distance matrix.
//!
//! Everything here is a pure function of its inputs: no shared state, no
//! I/O.  The compute task in `mst-compute` strings the pieces together.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`matrix`]     | `DistanceMatrix` (flat, symmetric, zero diagonal)        |
//! | [`edge`]       | `Edge`, `SpanningTree`                                   |
//! | [`union_find`] | `UnionFind` (path compression, union by rank)            |
//! | [`prim`]       | O(n²) linear-scan Prim from node 0                       |
//! | [`kruskal`]    | Kruskal over all `n(n-1)/2` pairs                        |
//! | [`algorithm`]  | `Algorithm` selector, `SpanningTreeBuilder` trait        |
//! | [`neighbors`]  | `NeighborLists` (per-node k-nearest, ascending)          |
//! | [`error`]      | `EngineError`, `EngineResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Matrix rows and neighbour rankings on Rayon's pool.      |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.       |

pub mod algorithm;
pub mod edge;
pub mod error;
pub mod kruskal;
pub mod matrix;
pub mod neighbors;
pub mod prim;
pub mod union_find;

#[cfg(test)]
mod tests;

pub use algorithm::{Algorithm, SpanningTreeBuilder};
pub use edge::{Edge, SpanningTree};
pub use error::{EngineError, EngineResult};
pub use kruskal::{Kruskal, kruskal};
pub use matrix::DistanceMatrix;
pub use neighbors::{NeighborLists, neighbor_count};
pub use prim::{Prim, prim};
pub use union_find::UnionFind;
