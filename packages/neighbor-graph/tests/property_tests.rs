//! Property-based tests for graph construction
//!
//! Invariants that should hold for ALL embeddings:
//! - Neighbors: exactly k distinct non-self indices, nearest first
//! - Edges: canonical, unique, weight = number of directions present
//! - SNN: every surviving weight is in [threshold, 1], every dropped KNN
//!   edge scored below it
//! - Backends: kd-tree and brute force agree

use neighbor_graph::features::edge_list::EdgeListBuilder;
use neighbor_graph::features::neighbor_search::{
    BruteForceSearcher, KdTreeSearcher, NeighborSearcher,
};
use neighbor_graph::features::snn::{jaccard_sorted, ClosedNeighborhoods, SnnRefiner};
use neighbor_graph::config::SnnScope;
use neighbor_graph::{Embedding, WorkerPool};
use proptest::prelude::*;

fn embedding_strategy() -> impl Strategy<Value = Embedding> {
    (3usize..40, 1usize..4).prop_flat_map(|(n, d)| {
        prop::collection::vec(-100.0f64..100.0, n * d)
            .prop_map(move |data| Embedding::new(n, d, data).unwrap())
    })
}

/// Coarse coordinates so that distance ties are common
fn gridded_strategy() -> impl Strategy<Value = Embedding> {
    (3usize..30, 1usize..3).prop_flat_map(|(n, d)| {
        prop::collection::vec(0i32..4, n * d).prop_map(move |data| {
            Embedding::new(n, d, data.into_iter().map(f64::from).collect()).unwrap()
        })
    })
}

/// Decimal coordinates: equal distances that round differently
fn decimal_grid_strategy() -> impl Strategy<Value = Embedding> {
    (10usize..60, 2usize..4).prop_flat_map(|(n, d)| {
        prop::collection::vec((0u8..5, 0u8..4), n * d).prop_map(move |cells| {
            let data = cells
                .into_iter()
                .map(|(m, q)| 0.1 * f64::from(m) + 0.3 * f64::from(q))
                .collect();
            Embedding::new(n, d, data).unwrap()
        })
    })
}

proptest! {
    #[test]
    fn prop_neighbors_are_k_distinct_non_self(embedding in embedding_strategy(), k in 1usize..6) {
        let n = embedding.n_points();
        let k = k.min(n - 1);
        let pool = WorkerPool::sequential().unwrap();
        let neighbors = KdTreeSearcher::exact().search_all(&embedding, k, &pool).unwrap();

        for (i, row) in neighbors.iter() {
            prop_assert_eq!(row.len(), k);
            prop_assert!(!row.contains(&i));
            let mut sorted = row.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), k);
            let d = neighbors.distances(i);
            prop_assert!(d.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn prop_kd_tree_matches_brute_force(embedding in gridded_strategy(), k in 1usize..5) {
        let k = k.min(embedding.n_points() - 1);
        let pool = WorkerPool::new(2).unwrap();
        let kd = KdTreeSearcher::exact().search_all(&embedding, k, &pool).unwrap();
        let bf = BruteForceSearcher::new().search_all(&embedding, k, &pool).unwrap();
        prop_assert_eq!(kd, bf);
    }

    #[test]
    fn prop_kd_tree_matches_brute_force_on_decimal_grid(
        embedding in decimal_grid_strategy(),
        k in 1usize..10,
    ) {
        let k = k.min(embedding.n_points() - 1);
        let pool = WorkerPool::sequential().unwrap();
        let kd = KdTreeSearcher::exact().search_all(&embedding, k, &pool).unwrap();
        let bf = BruteForceSearcher::new().search_all(&embedding, k, &pool).unwrap();
        prop_assert_eq!(kd, bf);
    }

    #[test]
    fn prop_edge_weights_count_directions(embedding in embedding_strategy(), k in 1usize..6) {
        let k = k.min(embedding.n_points() - 1);
        let pool = WorkerPool::sequential().unwrap();
        let neighbors = BruteForceSearcher::new().search_all(&embedding, k, &pool).unwrap();
        let (edges, stats) = EdgeListBuilder::new().build(&neighbors, &pool);

        prop_assert_eq!(stats.directed_pairs, embedding.n_points() * k);
        let mut prev = None;
        for e in edges.iter() {
            prop_assert!(e.source < e.target);
            prop_assert!(prev.map_or(true, |p| p < e.key()));
            prev = Some(e.key());

            let forward = neighbors.neighbors(e.source).contains(&e.target);
            let backward = neighbors.neighbors(e.target).contains(&e.source);
            prop_assert!(forward || backward);
            let expected = forward as u8 + backward as u8;
            prop_assert_eq!(e.weight, f64::from(expected));
        }
    }

    #[test]
    fn prop_snn_weights_above_threshold(
        embedding in embedding_strategy(),
        k in 1usize..6,
        threshold in 0.0f64..=1.0,
        shared in any::<bool>(),
    ) {
        let n = embedding.n_points();
        let k = k.min(n - 1);
        let pool = WorkerPool::sequential().unwrap();
        let neighbors = BruteForceSearcher::new().search_all(&embedding, k, &pool).unwrap();
        let (knn, _) = EdgeListBuilder::new().build(&neighbors, &pool);

        let scope = if shared { SnnScope::SharedNeighbors } else { SnnScope::KnnEdges };
        let (snn, stats) = SnnRefiner::new(threshold, scope).refine(n, &knn, &pool);

        prop_assert_eq!(stats.retained_edges + stats.pruned_edges, stats.candidate_pairs);
        for e in snn.iter() {
            prop_assert!(e.weight > 0.0);
            prop_assert!(e.weight >= threshold && e.weight <= 1.0);
            if !shared {
                prop_assert!(knn.weight(e.source, e.target).is_some());
            }
        }

        let index = ClosedNeighborhoods::build(n, &knn);
        for e in knn.iter() {
            if snn.weight(e.source, e.target).is_none() {
                let similarity = jaccard_sorted(index.of(e.source), index.of(e.target));
                prop_assert!(similarity < threshold, "{:?} scored {}", e.key(), similarity);
            }
        }
    }
}
