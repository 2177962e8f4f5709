//! Brute force neighbor search.
//!
//! Linear scan - O(N² · D) but exact and allocation-light. Used for small
//! inputs and as the reference the kd-tree is tested against.

use crate::errors::{GraphError, Result};
use crate::features::neighbor_search::domain::{CandidateHeap, NeighborSearcher};
use crate::shared::{squared_euclidean, Embedding, NeighborList, WorkerPool};
use rayon::prelude::*;

/// Exhaustive exact search
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceSearcher;

impl BruteForceSearcher {
    pub fn new() -> Self {
        Self
    }
}

impl NeighborSearcher for BruteForceSearcher {
    fn name(&self) -> &'static str {
        "brute_force"
    }

    fn search_all(
        &self,
        embedding: &Embedding,
        k: usize,
        pool: &WorkerPool,
    ) -> Result<NeighborList> {
        let n = embedding.n_points();
        if k == 0 || k >= n {
            return Err(GraphError::search(format!(
                "k={} is not in 1..{} for {} points",
                k, n, n
            )));
        }

        let min_len = pool.min_batch(n);
        let rows = pool.install(|| {
            (0..n)
                .into_par_iter()
                .with_min_len(min_len)
                .map(|i| {
                    let query = embedding.row(i);
                    let mut heap = CandidateHeap::new(k);
                    for (j, row) in embedding.rows().enumerate() {
                        if j != i {
                            heap.push(j, squared_euclidean(query, row));
                        }
                    }
                    heap.into_sorted()
                })
                .collect::<Vec<_>>()
        });

        Ok(NeighborList::from_rows(k, rows))
    }
}
