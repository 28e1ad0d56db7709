//! The compute task: one request in, one response out.

use std::time::Instant;

use mst_core::{City, GeoPoint, NodeIndex, PairKey, great_circle_points};
use mst_engine::{DistanceMatrix, NeighborLists};

use crate::{ComputeRequest, ComputeResponse, GeometryEntry, PairMap, Polyline};

/// Run a request to completion on the calling thread.
///
/// Distances, tree and neighbour lists all come from one matrix.  Geometry
/// is generated once per unordered pair: candidate pairs first (each pair
/// listed once however many nodes rank it), then MST edges, which reuse the
/// candidate polyline when the pair is already known.
///
/// An empty city list is not an error; it yields an empty response.
pub fn compute(request: &ComputeRequest) -> ComputeResponse {
    let n = request.cities.len();
    if n == 0 {
        return ComputeResponse::empty(request.generation);
    }

    let started = Instant::now();
    let cfg = &request.config;
    let positions: Vec<GeoPoint> = request.cities.iter().map(City::position).collect();

    let matrix = DistanceMatrix::from_points(&positions, cfg.radius_km);
    let t_matrix = started.elapsed();

    let mst = request.algorithm.run(&matrix);
    let neighbors = NeighborLists::k_nearest(&matrix, cfg.k_max);
    let t_graph = started.elapsed();

    let opts = cfg.great_circle_options();
    let mut lines: PairMap<Polyline> = PairMap::default();
    let mut pair_line = |key: PairKey| -> (Polyline, bool) {
        if let Some(line) = lines.get(&key) {
            return (line.clone(), false);
        }
        let line: Polyline =
            great_circle_points(positions[key.lo().index()], positions[key.hi().index()], &opts)
                .into();
        lines.insert(key, line.clone());
        (line, true)
    };

    let mut candidate_geometry = Vec::new();
    for (i, list) in neighbors.as_lists().iter().enumerate() {
        let from = NodeIndex::from_usize(i);
        for &to in list {
            let key = PairKey::new(from, to);
            let (line, fresh) = pair_line(key);
            if fresh {
                candidate_geometry.push(GeometryEntry(key, line));
            }
        }
    }

    let mst_geometry: Vec<GeometryEntry> = mst
        .iter()
        .map(|e| {
            let key = e.key();
            GeometryEntry(key, pair_line(key).0)
        })
        .collect();

    log::debug!(
        "computed {} over {n} cities: matrix {:?}, graph {:?}, total {:?} \
         ({} candidate + {} mst geodesics)",
        request.algorithm,
        t_matrix,
        t_graph - t_matrix,
        started.elapsed(),
        candidate_geometry.len(),
        mst_geometry.len(),
    );

    ComputeResponse {
        generation: request.generation,
        mst,
        neighbors: neighbors.into_lists(),
        candidate_geometry,
        mst_geometry,
    }
}
