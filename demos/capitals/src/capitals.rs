//! The built-in dataset: Italy's regional capitals.

use mst_core::City;

const CAPITALS: &[(&str, f64, f64)] = &[
    ("Aosta",     45.737,  7.315),
    ("Turin",     45.0703, 7.6869),
    ("Genoa",     44.4056, 8.9463),
    ("Milan",     45.4642, 9.19),
    ("Trento",    46.0667, 11.1167),
    ("Venice",    45.4386, 12.3267),
    ("Trieste",   45.6408, 13.7695),
    ("Bologna",   44.4949, 11.3426),
    ("Florence",  43.7711, 11.2486),
    ("Perugia",   43.1107, 12.3908),
    ("Ancona",    43.6158, 13.5189),
    ("Rome",      41.9028, 12.4964),
    ("L'Aquila",  42.3498, 13.3995),
    ("Naples",    40.8518, 14.2681),
    ("Catanzaro", 38.905,  16.5944),
    ("Bari",      41.1256, 16.8668),
    ("Potenza",   40.6394, 15.805),
    ("Palermo",   38.1157, 13.3615),
    ("Cagliari",  39.2238, 9.1217),
];

pub fn regional_capitals() -> Vec<City> {
    CAPITALS.iter().map(|&(name, lat, lon)| City::new(name, lat, lon)).collect()
}
