//! Dense all-pairs distance matrix.
//!
//! # Data layout
//!
//! Row-major `Vec<f64>` of length `n * n`.  Row `i` is the contiguous slice
//! `data[i * n .. (i + 1) * n]`, which is exactly what Prim's relaxation
//! loop and the neighbour ranking scan.
//!
//! Only the upper triangle is computed; each value is mirrored into the
//! lower triangle, so `get(i, j) == get(j, i)` holds bit for bit.  The
//! matrix lives for one compute request and is dropped afterwards.

use mst_core::{GeoPoint, haversine};

use crate::{EngineError, EngineResult};

/// Symmetric `n × n` matrix of non-negative distances with a zero diagonal.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    n:    usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Great-circle distances between every pair of `points`, in the units
    /// of `radius_km`.
    ///
    /// With the `parallel` feature the upper-triangle rows are computed on
    /// Rayon's thread pool; the result is identical either way.
    pub fn from_points(points: &[GeoPoint], radius_km: f64) -> Self {
        let n = points.len();
        let mut data = vec![0.0; n * n];

        #[cfg(not(feature = "parallel"))]
        {
            for i in 0..n {
                for j in (i + 1)..n {
                    let d = haversine(points[i], points[j], radius_km);
                    data[i * n + j] = d;
                    data[j * n + i] = d;
                }
            }
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            // Each task fills the upper part of its own row; mirroring is a
            // second sequential pass so no two tasks write the same cell.
            data.par_chunks_mut(n.max(1)).enumerate().for_each(|(i, row)| {
                for j in (i + 1)..n {
                    row[j] = haversine(points[i], points[j], radius_km);
                }
            });
            for i in 0..n {
                for j in (i + 1)..n {
                    data[j * n + i] = data[i * n + j];
                }
            }
        }

        Self { n, data }
    }

    /// Build from explicit rows, validating shape and distance invariants.
    ///
    /// Used for hand-built fixtures and for callers that already hold a
    /// distance table from elsewhere.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> EngineResult<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(EngineError::NotSquare { row: i, expected: n, got: row.len() });
            }
            data.extend_from_slice(row);
        }

        for i in 0..n {
            if data[i * n + i] != 0.0 {
                return Err(EngineError::NonZeroDiagonal(i));
            }
            for j in (i + 1)..n {
                let value = data[i * n + j];
                if !value.is_finite() || value < 0.0 {
                    return Err(EngineError::InvalidDistance { i, j, value });
                }
                if value != data[j * n + i] {
                    return Err(EngineError::Asymmetric { i, j });
                }
            }
        }

        Ok(Self { n, data })
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between nodes `i` and `j`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    /// All distances from node `i`, indexed by destination node.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }
}
