//! Unit tests for mst-engine.
//!
//! Fixtures are hand-built matrices or seeded synthetic city sets, so every
//! expected edge is known in advance.

#[cfg(test)]
mod helpers {
    use mst_core::{BoundingBox, DatasetRng, EARTH_RADIUS_KM, GeoPoint};

    use crate::DistanceMatrix;

    /// Triangle with side lengths 10 (0-1), 20 (0-2), 25 (1-2).
    pub fn triangle() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 10.0, 20.0],
            vec![10.0, 0.0, 25.0],
            vec![20.0, 25.0, 0.0],
        ])
        .unwrap()
    }

    /// `n` nodes, every pair at distance 1.
    pub fn uniform(n: usize) -> DistanceMatrix {
        let rows = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 0.0 } else { 1.0 }).collect())
            .collect();
        DistanceMatrix::from_rows(rows).unwrap()
    }

    pub fn random_matrix(rng: &mut DatasetRng, n: usize) -> (Vec<GeoPoint>, DistanceMatrix) {
        let bbox = BoundingBox::new(35.0, 48.0, 5.0, 20.0);
        let points: Vec<GeoPoint> = rng.cities(n, bbox).iter().map(|c| c.position()).collect();
        let matrix = DistanceMatrix::from_points(&points, EARTH_RADIUS_KM);
        (points, matrix)
    }
}

// ── Distance matrix ───────────────────────────────────────────────────────────

#[cfg(test)]
mod matrix {
    use mst_core::{EARTH_RADIUS_KM, GeoPoint, haversine};

    use crate::{DistanceMatrix, EngineError};

    #[test]
    fn from_points_mirrors_haversine() {
        let pts = [
            GeoPoint::new(41.9028, 12.4964),
            GeoPoint::new(45.4642, 9.19),
            GeoPoint::new(40.8518, 14.2681),
        ];
        let m = DistanceMatrix::from_points(&pts, EARTH_RADIUS_KM);
        assert_eq!(m.len(), 3);
        for i in 0..3 {
            assert_eq!(m.get(i, i), 0.0);
            for j in (i + 1)..3 {
                assert_eq!(m.get(i, j), haversine(pts[i], pts[j], EARTH_RADIUS_KM));
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
        assert_eq!(m.row(1).len(), 3);
    }

    #[test]
    fn empty_points() {
        let m = DistanceMatrix::from_points(&[], EARTH_RADIUS_KM);
        assert!(m.is_empty());
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert!(matches!(err, EngineError::NotSquare { row: 1, expected: 2, got: 1 }));
    }

    #[test]
    fn rejects_asymmetric() {
        let err = DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![2.0, 0.0]]).unwrap_err();
        assert!(matches!(err, EngineError::Asymmetric { i: 0, j: 1 }));
    }

    #[test]
    fn rejects_negative_and_diagonal() {
        let neg = DistanceMatrix::from_rows(vec![vec![0.0, -1.0], vec![-1.0, 0.0]]).unwrap_err();
        assert!(matches!(neg, EngineError::InvalidDistance { .. }));
        let diag = DistanceMatrix::from_rows(vec![vec![1.0]]).unwrap_err();
        assert!(matches!(diag, EngineError::NonZeroDiagonal(0)));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_fill_matches_sequential() {
        use mst_core::DatasetRng;

        use super::helpers::random_matrix;

        let (points, m) = random_matrix(&mut DatasetRng::new(11), 75);
        let n = points.len();
        let mut rows = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = haversine(points[i], points[j], EARTH_RADIUS_KM);
                rows[i][j] = d;
                rows[j][i] = d;
            }
        }
        assert_eq!(m, DistanceMatrix::from_rows(rows).unwrap());
    }
}

// ── Union-find ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod union_find {
    use crate::UnionFind;

    #[test]
    fn unions_merge_sets() {
        let mut uf = UnionFind::new(5);
        assert!(uf.union(0, 1));
        assert!(uf.union(3, 4));
        assert!(!uf.union(1, 0));
        assert!(uf.connected(0, 1));
        assert!(!uf.connected(1, 3));
        assert!(uf.union(1, 4));
        assert!(uf.connected(0, 3));
        assert_eq!(uf.len(), 5);
    }

    #[test]
    fn long_chain_compresses() {
        let mut uf = UnionFind::new(10_000);
        for i in 1..10_000u32 {
            uf.union(i - 1, i);
        }
        let root = uf.find(9_999);
        assert!((0..10_000u32).all(|i| uf.find(i) == root));
    }
}

// ── Spanning trees ────────────────────────────────────────────────────────────

#[cfg(test)]
mod spanning {
    use mst_core::{DatasetRng, NodeIndex};

    use super::helpers::{random_matrix, triangle, uniform};
    use crate::{Algorithm, DistanceMatrix, Edge, SpanningTree, kruskal, prim};

    #[test]
    fn triangle_picks_two_shortest() {
        for alg in [Algorithm::Prim, Algorithm::Kruskal] {
            let tree = alg.run(&triangle());
            assert_eq!(tree.len(), 2, "{alg}");
            assert_eq!(tree.total_weight(), 30.0, "{alg}");
            let mut weights: Vec<f64> = tree.iter().map(|e| e.w).collect();
            weights.sort_by(f64::total_cmp);
            assert_eq!(weights, [10.0, 20.0]);
        }
    }

    #[test]
    fn prim_emits_discovery_order() {
        let tree = prim(&triangle());
        assert_eq!(
            tree.edges(),
            &[
                Edge::new(NodeIndex(0), NodeIndex(1), 10.0),
                Edge::new(NodeIndex(0), NodeIndex(2), 20.0),
            ]
        );
    }

    #[test]
    fn prim_ties_go_to_lowest_index() {
        let tree = prim(&uniform(4));
        let pairs: Vec<(u32, u32)> = tree.iter().map(|e| (e.u.0, e.v.0)).collect();
        assert_eq!(pairs, [(0, 1), (0, 2), (0, 3)]);
        // Reproducible run to run.
        assert_eq!(prim(&uniform(4)), tree);
    }

    #[test]
    fn kruskal_emits_ascending_weights() {
        let mut rng = DatasetRng::new(11);
        let (_, m) = random_matrix(&mut rng, 25);
        let tree = kruskal(&m);
        assert!(tree.edges().windows(2).all(|w| w[0].w <= w[1].w));
        assert!(tree.iter().all(|e| e.u < e.v));
    }

    #[test]
    fn degenerate_sizes_are_empty() {
        let empty = DistanceMatrix::from_rows(vec![]).unwrap();
        let single = DistanceMatrix::from_rows(vec![vec![0.0]]).unwrap();
        for alg in [Algorithm::Prim, Algorithm::Kruskal] {
            assert!(alg.run(&empty).is_empty());
            assert!(alg.run(&single).is_empty());
        }
        assert!(SpanningTree::empty().spans(0));
        assert!(SpanningTree::empty().spans(1));
    }

    #[test]
    fn zero_weight_edge_accepted() {
        // Nodes 1 and 2 coincide.
        let m = DistanceMatrix::from_rows(vec![
            vec![0.0, 5.0, 5.0],
            vec![5.0, 0.0, 0.0],
            vec![5.0, 0.0, 0.0],
        ])
        .unwrap();
        for alg in [Algorithm::Prim, Algorithm::Kruskal] {
            let tree = alg.run(&m);
            assert!(tree.spans(3));
            assert_eq!(tree.total_weight(), 5.0);
            assert!(tree.iter().any(|e| e.w == 0.0));
        }
    }

    #[test]
    fn prim_and_kruskal_agree_on_weight() {
        let mut root = DatasetRng::new(2024);
        for trial in 0..40 {
            let n = 2 + trial;
            let (_, m) = random_matrix(&mut root.child(trial as u64), n);
            let p = prim(&m);
            let k = kruskal(&m);
            assert!(p.spans(n), "prim n={n}");
            assert!(k.spans(n), "kruskal n={n}");
            let (pw, kw) = (p.total_weight(), k.total_weight());
            assert!((pw - kw).abs() <= 1e-9 * pw.max(1.0), "n={n}: prim {pw} vs kruskal {kw}");
        }
    }

    #[test]
    fn weights_come_from_matrix_verbatim() {
        let mut rng = DatasetRng::new(5);
        let (_, m) = random_matrix(&mut rng, 30);
        for alg in [Algorithm::Prim, Algorithm::Kruskal] {
            for e in &alg.run(&m) {
                assert_eq!(e.w, m.get(e.u.index(), e.v.index()));
            }
        }
    }

    #[test]
    fn spans_rejects_cycles() {
        let cyc = SpanningTree::from_edges(vec![
            Edge::new(NodeIndex(0), NodeIndex(1), 1.0),
            Edge::new(NodeIndex(1), NodeIndex(0), 1.0),
        ]);
        assert!(!cyc.spans(3));
    }

    #[test]
    fn algorithm_parses() {
        assert_eq!("Kruskal".parse::<Algorithm>().unwrap(), Algorithm::Kruskal);
        assert_eq!(" prim ".parse::<Algorithm>().unwrap(), Algorithm::Prim);
        assert!("boruvka".parse::<Algorithm>().is_err());
        assert_eq!(Algorithm::default(), Algorithm::Prim);
    }
}

// ── Neighbour ranking ─────────────────────────────────────────────────────────

#[cfg(test)]
mod neighbors {
    use mst_core::{DatasetRng, NodeIndex};

    use super::helpers::{random_matrix, triangle, uniform};
    use crate::{DistanceMatrix, NeighborLists, neighbor_count};

    #[test]
    fn k_is_clamped() {
        assert_eq!(neighbor_count(16, 0), 0);
        assert_eq!(neighbor_count(16, 1), 0);
        assert_eq!(neighbor_count(16, 5), 4);
        assert_eq!(neighbor_count(0, 5), 1);
        assert_eq!(neighbor_count(3, 100), 3);
    }

    #[test]
    fn triangle_lists() {
        let lists = NeighborLists::k_nearest(&triangle(), 16);
        assert_eq!(lists.of(NodeIndex(0)), &[NodeIndex(1), NodeIndex(2)]);
        assert_eq!(lists.of(NodeIndex(1)), &[NodeIndex(0), NodeIndex(2)]);
        assert_eq!(lists.of(NodeIndex(2)), &[NodeIndex(0), NodeIndex(1)]);
        assert_eq!(lists.prefix(NodeIndex(2), 1), &[NodeIndex(0)]);
        assert_eq!(lists.prefix(NodeIndex(2), 10).len(), 2);
    }

    #[test]
    fn sorted_ascending_with_full_k() {
        let mut rng = DatasetRng::new(99);
        let (_, m) = random_matrix(&mut rng, 40);
        let lists = NeighborLists::k_nearest(&m, 16);
        assert_eq!(lists.len(), 40);
        for i in 0..40 {
            let l = lists.of(NodeIndex::from_usize(i));
            assert_eq!(l.len(), 16);
            assert!(l.iter().all(|j| j.index() != i));
            assert!(l.windows(2).all(|w| m.get(i, w[0].index()) <= m.get(i, w[1].index())));
            // Nothing outside the list is closer than its farthest member.
            let worst = m.get(i, l[15].index());
            let closer = (0..40).filter(|&j| j != i && m.get(i, j) < worst).count();
            assert!(closer <= 15);
        }
    }

    #[test]
    fn ties_keep_index_order() {
        let lists = NeighborLists::k_nearest(&uniform(5), 3);
        assert_eq!(lists.of(NodeIndex(2)), &[NodeIndex(0), NodeIndex(1), NodeIndex(3)]);
    }

    #[test]
    fn single_node_has_empty_list() {
        let lists = NeighborLists::k_nearest(&DistanceMatrix::from_rows(vec![vec![0.0]]).unwrap(), 16);
        assert_eq!(lists.len(), 1);
        assert!(lists.of(NodeIndex(0)).is_empty());
        assert!(lists.of(NodeIndex(7)).is_empty());
    }
}
