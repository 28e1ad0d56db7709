//! Deterministic synthetic datasets.
//!
//! Seeded `SmallRng` so the same seed always yields the same city list.
//! Used by the demo binary (`--random N`) and by cross-algorithm checks
//! that need many varied inputs.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::City;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Lat/lon rectangle (degrees) synthetic cities are drawn from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// The whole globe.
    pub const WORLD: BoundingBox = BoundingBox {
        min_lat: -90.0,
        max_lat: 90.0,
        min_lon: -180.0,
        max_lon: 180.0,
    };

    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self { min_lat, max_lat, min_lon, max_lon }
    }
}

/// Seeded generator for synthetic city lists.
pub struct DatasetRng(SmallRng);

impl DatasetRng {
    pub fn new(seed: u64) -> Self {
        DatasetRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child generator, one per trial in a batch of checks.
    pub fn child(&mut self, offset: u64) -> DatasetRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        DatasetRng(SmallRng::seed_from_u64(child_seed))
    }

    /// `n` cities uniformly inside `bbox`, named `city-0`, `city-1`, …
    ///
    /// Sampling is uniform in lat/lon, not in area; that is fine for
    /// exercising the algorithms.
    pub fn cities(&mut self, n: usize, bbox: BoundingBox) -> Vec<City> {
        (0..n)
            .map(|i| {
                let lat = sample(&mut self.0, bbox.min_lat, bbox.max_lat);
                let lon = sample(&mut self.0, bbox.min_lon, bbox.max_lon);
                let population = self.0.gen_range(1_000..5_000_000u64);
                City::new(format!("city-{i}"), lat, lon).with_population(population)
            })
            .collect()
    }
}

fn sample(rng: &mut SmallRng, lo: f64, hi: f64) -> f64 {
    if hi > lo { rng.gen_range(lo..hi) } else { lo }
}
