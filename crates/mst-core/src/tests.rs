//! Unit tests for mst-core primitives.

#[cfg(test)]
mod ids {
    use crate::{NodeIndex, PairKey};

    #[test]
    fn index_roundtrip() {
        let id = NodeIndex(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeIndex::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn pair_key_is_canonical() {
        let a = PairKey::new(NodeIndex(7), NodeIndex(3));
        let b = PairKey::new(NodeIndex(3), NodeIndex(7));
        assert_eq!(a, b);
        assert_eq!(a.lo(), NodeIndex(3));
        assert_eq!(a.hi(), NodeIndex(7));
        assert_eq!(a.to_string(), "3|7");
    }

    #[test]
    fn pair_key_serializes_as_ordered_tuple() {
        let key = PairKey::new(NodeIndex(9), NodeIndex(2));
        assert_eq!(serde_json::to_string(&key).unwrap(), "[2,9]");
        // Deserialising a reversed tuple still yields the canonical key.
        let back: PairKey = serde_json::from_str("[9,2]").unwrap();
        assert_eq!(back, key);
    }
}

#[cfg(test)]
mod geo {
    use crate::{EARTH_RADIUS_KM, GeoPoint, GreatCircleOptions, great_circle_points, haversine,
        split_at_antimeridian};

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(41.9028, 12.4964);
        assert_eq!(haversine(p, p, EARTH_RADIUS_KM), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        // ~1 degree of latitude ≈ 111.19 km
        let a = GeoPoint::new(30.0, -88.0);
        let b = GeoPoint::new(31.0, -88.0);
        let d = haversine(a, b, EARTH_RADIUS_KM);
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn symmetric() {
        let rome = GeoPoint::new(41.9028, 12.4964);
        let milan = GeoPoint::new(45.4642, 9.19);
        assert_eq!(
            haversine(rome, milan, EARTH_RADIUS_KM),
            haversine(milan, rome, EARTH_RADIUS_KM)
        );
    }

    #[test]
    fn antipodal_is_finite() {
        let pairs = [
            (GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0)),
            (GeoPoint::new(90.0, 0.0), GeoPoint::new(-90.0, 0.0)),
            (GeoPoint::new(45.0, 10.0), GeoPoint::new(-45.0, -170.0)),
        ];
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
        for (a, b) in pairs {
            let d = haversine(a, b, EARTH_RADIUS_KM);
            assert!(!d.is_nan() && d >= 0.0);
            assert!((d - half_circumference).abs() < 1e-3, "got {d}");
        }
    }

    #[test]
    fn segment_count_clamps() {
        let opts = GreatCircleOptions::default();
        assert_eq!(opts.segment_count(10.0), 6); // round(2) → min
        assert_eq!(opts.segment_count(300.0), 60);
        assert_eq!(opts.segment_count(5_000.0), 128); // → max
        let never_zero = GreatCircleOptions { min_segments: 0, ..opts };
        assert_eq!(never_zero.segment_count(0.1), 1);
    }

    #[test]
    fn great_circle_endpoints_exact() {
        let a = GeoPoint::new(41.9028, 12.4964);
        let b = GeoPoint::new(45.4642, 9.19);
        let pts = great_circle_points(a, b, &GreatCircleOptions::default());
        assert_eq!(pts.first(), Some(&a));
        assert_eq!(pts.last(), Some(&b));
        assert!(pts.len() > 2);
    }

    #[test]
    fn great_circle_midpoint_on_equator() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 90.0);
        let pts = great_circle_points(a, b, &GreatCircleOptions::default());
        assert_eq!(pts.len(), 129); // 128 segments
        let mid = pts[64];
        assert!(mid.lat.abs() < 1e-9, "got {mid}");
        assert!((mid.lon - 45.0).abs() < 1e-9, "got {mid}");
    }

    #[test]
    fn great_circle_is_deterministic() {
        let a = GeoPoint::new(-33.86, 151.21);
        let b = GeoPoint::new(51.51, -0.13);
        let opts = GreatCircleOptions::default();
        assert_eq!(great_circle_points(a, b, &opts), great_circle_points(a, b, &opts));
    }

    #[test]
    fn degenerate_pairs_fall_back_to_endpoints() {
        let opts = GreatCircleOptions::default();
        let p = GeoPoint::new(10.0, 20.0);
        assert_eq!(great_circle_points(p, p, &opts), vec![p, p]);

        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);
        assert_eq!(great_circle_points(a, b, &opts), vec![a, b]);
    }

    #[test]
    fn split_breaks_at_longitude_jump() {
        let pts = [
            GeoPoint::new(0.0, 170.0),
            GeoPoint::new(0.0, 175.0),
            GeoPoint::new(0.0, 179.5),
            GeoPoint::new(0.0, -179.5),
            GeoPoint::new(0.0, -175.0),
        ];
        let parts = split_at_antimeridian(&pts, 180.0);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], &pts[..3]);
        assert_eq!(parts[1], &pts[3..]);
        for part in &parts {
            for w in part.windows(2) {
                assert!((w[1].lon - w[0].lon).abs() <= 180.0);
            }
        }
    }

    #[test]
    fn split_without_jump_is_one_part() {
        let pts = [GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)];
        assert_eq!(split_at_antimeridian(&pts, 180.0), vec![&pts[..]]);
        assert!(split_at_antimeridian(&[], 180.0).is_empty());
    }

    #[test]
    fn pacific_crossing_geodesic_splits() {
        let tokyo = GeoPoint::new(35.68, 139.69);
        let sf = GeoPoint::new(37.77, -122.42);
        let pts = great_circle_points(tokyo, sf, &GreatCircleOptions::default());
        let parts = split_at_antimeridian(&pts, 180.0);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts.iter().map(|p| p.len()).sum::<usize>(), pts.len());
    }
}

#[cfg(test)]
mod city {
    use crate::{City, DatasetKey};

    fn sample() -> Vec<City> {
        vec![
            City::new("Rome", 41.9028, 12.4964).with_population(2_873_000),
            City::new("Milan", 45.4642, 9.19),
        ]
    }

    #[test]
    fn identical_content_same_key() {
        assert_eq!(DatasetKey::from_cities(&sample()), DatasetKey::from_cities(&sample()));
    }

    #[test]
    fn order_changes_key() {
        let mut rev = sample();
        rev.reverse();
        assert_ne!(DatasetKey::from_cities(&sample()), DatasetKey::from_cities(&rev));
    }

    #[test]
    fn population_is_part_of_key() {
        let mut other = sample();
        other[1].population = Some(1);
        assert_ne!(DatasetKey::from_cities(&sample()), DatasetKey::from_cities(&other));
    }

    #[test]
    fn empty_key() {
        assert!(DatasetKey::from_cities(&[]).is_empty());
        assert_eq!(DatasetKey::from_cities(&sample()).len(), 2);
    }

    #[test]
    fn separators_in_names_do_not_collide() {
        let a = [City::new("x|;1.000000|1.000000|y", 0.0, 0.0), City::new("z", 2.0, 2.0)];
        let b = [City::new("x", 0.0, 0.0), City::new("y|;2.000000|2.000000|z", 1.0, 1.0)];
        assert_ne!(DatasetKey::from_cities(&a), DatasetKey::from_cities(&b));
    }

    #[test]
    fn coordinates_compare_at_six_decimals() {
        let a = [City::new("p", 10.000_000_1, 20.0)];
        let b = [City::new("p", 10.000_000_2, 20.0)];
        let c = [City::new("p", 10.000_001, 20.0)];
        assert_eq!(DatasetKey::from_cities(&a), DatasetKey::from_cities(&b));
        assert_ne!(DatasetKey::from_cities(&a), DatasetKey::from_cities(&c));
    }
}

#[cfg(test)]
mod config {
    use std::io::Write;

    use crate::{CoreError, VizConfig};

    #[test]
    fn defaults_validate() {
        let cfg = VizConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.default_animation_delay_ms(), 480.0);
        assert_eq!(cfg.great_circle_options().radius_km, 6371.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = VizConfig::from_json_str(r#"{ "k_max": 24, "wrap_lon_threshold": 170 }"#).unwrap();
        assert_eq!(cfg.k_max, 24);
        assert_eq!(cfg.k_min, 8);
        assert_eq!(cfg.wrap_lon_threshold, 170.0);
        assert_eq!(cfg.gc_max_segments, 128);
    }

    #[test]
    fn inverted_k_range_rejected() {
        let err = VizConfig::from_json_str(r#"{ "k_min": 20, "k_max": 4 }"#).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)), "got {err:?}");
    }

    #[test]
    fn malformed_json_is_json_error() {
        let err = VizConfig::from_json_str("{ k_max: ").unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
    }

    #[test]
    fn slider_mapping_is_inverted() {
        let s = VizConfig::default().speed_range;
        assert_eq!(s.delay_for_slider(s.max), s.min);
        assert_eq!(s.delay_for_slider(s.min), s.max);
        assert_eq!(s.delay_for_slider(10_000.0), s.min); // clamped
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "edge_growth_duration_factor": 2.5 }}"#).unwrap();
        let cfg = VizConfig::from_path(file.path()).unwrap();
        assert_eq!(cfg.edge_growth_duration_factor, 2.5);
    }
}

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use crate::{CoreError, load_cities_reader};

    const CSV: &str = "\
name,lat,lon,population\n\
Rome,41.9028,12.4964,2873000\n\
Milan,45.4642,9.19,\"1,352,000\"\n\
Broken,north,9.0,10\n\
,45.737,7.315,\n\
";

    #[test]
    fn parses_rows_in_order() {
        let cities = load_cities_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(cities.len(), 3);
        assert_eq!(cities[0].name, "Rome");
        assert_eq!(cities[0].population, Some(2_873_000));
        assert_eq!(cities[1].population, Some(1_352_000));
    }

    #[test]
    fn bad_rows_skipped_and_blank_names_filled() {
        let cities = load_cities_reader(Cursor::new(CSV)).unwrap();
        assert!(cities.iter().all(|c| c.name != "Broken"));
        assert_eq!(cities[2].name, "unknown");
        assert_eq!(cities[2].population, None);
    }

    #[test]
    fn ragged_row_is_csv_error() {
        let err = load_cities_reader(Cursor::new("name,lat,lon\nBari,41.1,16.8,extra\n")).unwrap_err();
        assert!(matches!(err, CoreError::Csv(_)), "got {err:?}");
    }

    #[test]
    fn population_column_optional() {
        let cities = load_cities_reader(Cursor::new("name,lat,lon\nBari,41.1256,16.8668\n")).unwrap();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].population, None);
    }
}

#[cfg(test)]
mod rng {
    use crate::{BoundingBox, DatasetRng};

    #[test]
    fn deterministic_same_seed() {
        let bbox = BoundingBox::new(36.0, 47.0, 6.0, 19.0);
        let a = DatasetRng::new(7).cities(20, bbox);
        let b = DatasetRng::new(7).cities(20, bbox);
        assert_eq!(a, b);
    }

    #[test]
    fn cities_inside_bbox() {
        let bbox = BoundingBox::new(36.0, 47.0, 6.0, 19.0);
        for c in DatasetRng::new(1).cities(200, bbox) {
            assert!((36.0..47.0).contains(&c.lat));
            assert!((6.0..19.0).contains(&c.lon));
        }
    }

    #[test]
    fn children_diverge() {
        let mut root = DatasetRng::new(3);
        let a = root.child(0).cities(1, BoundingBox::WORLD);
        let b = root.child(1).cities(1, BoundingBox::WORLD);
        assert_ne!(a, b);
    }
}
