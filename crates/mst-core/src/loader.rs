//! CSV city loader.
//!
//! # CSV format
//!
//! One row per city, in dataset order.  `population` may be empty and may
//! carry thousands separators or other decoration; only its digits are kept.
//!
//! ```csv
//! name,lat,lon,population
//! Rome,41.9028,12.4964,2873000
//! Milan,45.4642,9.19,"1,352,000"
//! Aosta,45.737,7.315,
//! ```
//!
//! Rows whose coordinates do not parse to finite numbers are skipped, the
//! same way the point fetcher drops elements without a usable centre.  A
//! blank name becomes `"unknown"`.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{City, CoreError, CoreResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CityRecord {
    #[serde(default)]
    name:       String,
    lat:        String,
    lon:        String,
    #[serde(default)]
    population: Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a city list from a CSV file.
pub fn load_cities_csv(path: &Path) -> CoreResult<Vec<City>> {
    let file = std::fs::File::open(path).map_err(CoreError::Io)?;
    load_cities_reader(file)
}

/// Like [`load_cities_csv`] but accepts any `Read` source.
pub fn load_cities_reader<R: Read>(reader: R) -> CoreResult<Vec<City>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut cities = Vec::new();

    for result in csv_reader.deserialize::<CityRecord>() {
        let row = result?;

        let (Some(lat), Some(lon)) = (parse_coord(&row.lat), parse_coord(&row.lon)) else {
            continue;
        };
        let name = if row.name.is_empty() { "unknown".to_string() } else { row.name };

        cities.push(City {
            name,
            lat,
            lon,
            population: row.population.as_deref().and_then(parse_population),
        });
    }

    Ok(cities)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_coord(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_population(s: &str) -> Option<u64> {
    let digits: String = s.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}
