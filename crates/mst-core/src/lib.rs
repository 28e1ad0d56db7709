//! `mst-core`: foundational types for the MST map visualizer.
//!
//! This crate is a dependency of every other `mst-*` crate.  It has no
//! `mst-*` dependencies and keeps its external ones small (`rand`,
//! `thiserror`, `serde`, `serde_json`, `csv`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `NodeIndex`, `PairKey`                                     |
//! | [`geo`]    | `GeoPoint`, haversine, great-circle interpolation, antimeridian split |
//! | [`city`]   | `City`, `DatasetKey`                                       |
//! | [`config`] | `VizConfig`, `SpeedRange`, style structs                   |
//! | [`loader`] | CSV city loader                                            |
//! | [`rng`]    | `DatasetRng` (seeded synthetic city sets)                  |
//! | [`error`]  | `CoreError`, `CoreResult`                                  |

pub mod city;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod loader;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use city::{City, DatasetKey};
pub use config::{MarkerStyle, PolylineStyle, SpeedRange, VizConfig};
pub use error::{CoreError, CoreResult};
pub use geo::{
    EARTH_RADIUS_KM, GeoPoint, GreatCircleOptions, great_circle_points, haversine,
    split_at_antimeridian,
};
pub use ids::{NodeIndex, PairKey};
pub use loader::{load_cities_csv, load_cities_reader};
pub use rng::{BoundingBox, DatasetRng};
