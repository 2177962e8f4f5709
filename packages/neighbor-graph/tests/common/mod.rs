//! Shared fixtures for integration tests

#![allow(dead_code)]

use neighbor_graph::{Embedding, GraphConfig};

/// Four points on a line at 0, 1, 2, 3
pub fn line4() -> Embedding {
    Embedding::from_column(&[0.0, 1.0, 2.0, 3.0]).unwrap()
}

/// Two tight pairs far apart
pub fn two_pairs() -> Embedding {
    Embedding::from_rows(&[[0.0, 0.0], [0.1, 0.0], [10.0, 10.0], [10.1, 10.0]]).unwrap()
}

/// Deterministic pseudo-random points in [0, 1)^d
pub fn scattered(n: usize, d: usize, seed: u64) -> Embedding {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let data = (0..n * d)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 11) as f64 / (1u64 << 53) as f64
        })
        .collect();
    Embedding::new(n, d, data).unwrap()
}

/// Exact KNN-only config with an explicit worker count
pub fn knn_config(k: usize, workers: usize) -> GraphConfig {
    GraphConfig::default()
        .k(k)
        .snn_enabled(false)
        .workers(workers)
}
