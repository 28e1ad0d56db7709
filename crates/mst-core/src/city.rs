//! Dataset points and the content-based dataset identity key.

use serde::{Deserialize, Serialize};

use crate::GeoPoint;

/// One geographic point of a dataset.  Immutable once loaded; its position
/// in the dataset `Vec` is its [`NodeIndex`](crate::NodeIndex).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub lat:  f64,
    pub lon:  f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
}

impl City {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self { name: name.into(), lat, lon, population: None }
    }

    pub fn with_population(mut self, population: u64) -> Self {
        self.population = Some(population);
        self
    }

    #[inline]
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

// ── DatasetKey ────────────────────────────────────────────────────────────────

/// Content-based identity of an ordered city list.
///
/// Two lists with the same cities in the same order produce equal keys, so
/// reloading a dataset keeps the geometry cache warm.  Order matters because
/// cache entries are keyed by node index.  Coordinates compare at six
/// decimals.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DatasetKey(Vec<CityKey>);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CityKey {
    lat_e6:     i64,
    lon_e6:     i64,
    name:       String,
    population: Option<u64>,
}

impl DatasetKey {
    pub fn from_cities(cities: &[City]) -> Self {
        DatasetKey(
            cities
                .iter()
                .map(|c| CityKey {
                    lat_e6:     micro_degrees(c.lat),
                    lon_e6:     micro_degrees(c.lon),
                    name:       c.name.clone(),
                    population: c.population,
                })
                .collect(),
        )
    }

    /// The key of the empty dataset.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of cities the key covers.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[inline]
fn micro_degrees(deg: f64) -> i64 {
    (deg * 1e6).round() as i64
}
