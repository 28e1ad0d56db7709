//! `mst-compute`: the off-thread unit of work and the geometry it produces.
//!
//! # Request / response
//!
//! ```text
//! UI thread                            worker thread
//! ─────────                            ─────────────
//! ComputeRequest { generation,  ──►    DistanceMatrix::from_points
//!   cities, algorithm, config }        Algorithm::run         → mst
//!                                      NeighborLists::k_nearest → neighbors
//!                                      great_circle_points per unique pair
//! ComputeResponse { generation, ◄──    (candidate pairs first, MST pairs reuse)
//!   mst, neighbors,
//!   candidateGeometry, mstGeometry }
//! ```
//!
//! Requests and responses are plain serde values with no handles into UI
//! state.  The worker owns nothing between requests; the UI side owns the
//! [`GreatCircleCache`] and fills it from each accepted response.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`request`] | `ComputeConfig`, `ComputeRequest`, `ComputeResponse`, `GeometryEntry` |
//! | [`task`]    | `compute()` (pure, synchronous)                         |
//! | [`worker`]  | `ComputeWorker` (dedicated thread + mpsc channels)      |
//! | [`cache`]   | `GreatCircleCache` (per-dataset, append-only)           |
//! | [`error`]   | `ComputeError`, `ComputeResult<T>`                      |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Matrix and neighbour rows on Rayon (via `mst-engine`). |
//! | `fx-hash`  | FxHash for the pair-keyed geometry maps.               |

pub mod cache;
pub mod error;
pub mod request;
pub mod task;
pub mod worker;


pub use cache::{GreatCircleCache, PairMap, PairSet};
pub use error::{ComputeError, ComputeResult};
pub use request::{ComputeConfig, ComputeRequest, ComputeResponse, GeometryEntry, Polyline};
pub use task::compute;
pub use worker::ComputeWorker;
