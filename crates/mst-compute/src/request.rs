//! Wire types crossing the compute boundary.
//!
//! Field names serialise in camelCase (`kMax`, `candidateGeometry`, …) and
//! edges as `{u, v, w}`, the shape the animation side consumes.

use std::sync::Arc;

use mst_core::{City, GeoPoint, GreatCircleOptions, NodeIndex, PairKey, VizConfig};
use mst_engine::{Algorithm, SpanningTree};
use serde::{Deserialize, Serialize};

/// Shared, immutable geodesic point sequence.
///
/// Cloning a `Polyline` clones the `Arc`, so the MST edge and the candidate
/// edge for the same pair hold the very same allocation.
pub type Polyline = Arc<[GeoPoint]>;

// ── ComputeConfig ─────────────────────────────────────────────────────────────

/// The subset of [`VizConfig`] the compute task needs.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComputeConfig {
    pub k_max:             usize,
    pub gc_min_segments:   u32,
    pub gc_max_segments:   u32,
    pub gc_segment_factor: f64,
    pub radius_km:         f64,
}

impl Default for ComputeConfig {
    fn default() -> Self {
        Self::from(&VizConfig::default())
    }
}

impl From<&VizConfig> for ComputeConfig {
    fn from(cfg: &VizConfig) -> Self {
        Self {
            k_max:             cfg.k_max,
            gc_min_segments:   cfg.gc_min_segments,
            gc_max_segments:   cfg.gc_max_segments,
            gc_segment_factor: cfg.gc_segment_factor,
            radius_km:         cfg.distance_radius_km,
        }
    }
}

impl ComputeConfig {
    pub fn great_circle_options(&self) -> GreatCircleOptions {
        GreatCircleOptions {
            min_segments:   self.gc_min_segments,
            max_segments:   self.gc_max_segments,
            segment_factor: self.gc_segment_factor,
            radius_km:      self.radius_km,
        }
    }
}

// ── Request ───────────────────────────────────────────────────────────────────

/// One unit of work.  `generation` is echoed back in the response so the
/// caller can drop results for requests it has since superseded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeRequest {
    pub generation: u64,
    pub cities:     Vec<City>,
    pub algorithm:  Algorithm,
    pub config:     ComputeConfig,
}

// ── Response ──────────────────────────────────────────────────────────────────

/// `(key, points)` for one unordered pair.  Points run from `key.lo()` to
/// `key.hi()`.
///
/// Serialised as a two-element array `[[lo, hi], [{lat, lon}, …]]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeometryEntry(pub PairKey, pub Polyline);

impl GeometryEntry {
    #[inline]
    pub fn key(&self) -> PairKey {
        self.0
    }

    #[inline]
    pub fn points(&self) -> &Polyline {
        &self.1
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeResponse {
    pub generation: u64,
    /// Spanning-tree edges in playback order.
    pub mst: SpanningTree,
    /// `neighbors[i]` = nearest nodes to `i`, ascending by distance.
    pub neighbors: Vec<Vec<NodeIndex>>,
    /// One entry per unique candidate pair.
    pub candidate_geometry: Vec<GeometryEntry>,
    /// One entry per MST edge, in MST order.
    pub mst_geometry: Vec<GeometryEntry>,
}

impl ComputeResponse {
    /// The response to an empty dataset.
    pub fn empty(generation: u64) -> Self {
        Self { generation, ..Self::default() }
    }
}
