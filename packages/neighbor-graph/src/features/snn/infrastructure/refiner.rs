//! SNN Refiner
//!
//! Reweights edges by the Jaccard overlap of closed neighborhoods and drops
//! every pair whose similarity is below the prune threshold. The boundary is
//! inclusive: a pair with similarity exactly equal to the threshold is kept.
//!
//! # Scope
//! - `KnnEdges`: candidates are the input edges, O(N·k) pairs.
//! - `SharedNeighbors`: candidates are all pairs within two hops. Pairs with
//!   no shared neighbor have similarity 0 and are never emitted.

use super::adjacency_index::ClosedNeighborhoods;
use crate::config::{SnnConfig, SnnScope};
use crate::features::snn::domain::jaccard_sorted;
use crate::shared::{Edge, EdgeList, WeightKind, WorkerPool};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

/// Counts gathered while refining
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnnStats {
    pub candidate_pairs: usize,
    pub retained_edges: usize,
    pub pruned_edges: usize,
    pub execution_time_ms: u64,
}

/// Shared-nearest-neighbor reweighting and pruning
#[derive(Debug, Clone)]
pub struct SnnRefiner {
    prune_threshold: f64,
    scope: SnnScope,
}

impl SnnRefiner {
    pub fn new(prune_threshold: f64, scope: SnnScope) -> Self {
        Self {
            prune_threshold,
            scope,
        }
    }

    pub fn from_config(config: &SnnConfig) -> Self {
        Self::new(config.prune_threshold, config.scope)
    }

    pub fn prune_threshold(&self) -> f64 {
        self.prune_threshold
    }

    /// Retention rule applied to every recomputed weight
    #[inline]
    pub fn retains(&self, similarity: f64) -> bool {
        similarity >= self.prune_threshold
    }

    /// Refine `edges` over `n_nodes` nodes
    pub fn refine(
        &self,
        n_nodes: usize,
        edges: &EdgeList,
        pool: &WorkerPool,
    ) -> (EdgeList, SnnStats) {
        let start = Instant::now();
        let index = ClosedNeighborhoods::build(n_nodes, edges);
        debug!(nodes = n_nodes, scope = ?self.scope, "closed-neighborhood index built");

        let candidates = match self.scope {
            SnnScope::KnnEdges => edges.iter().map(Edge::key).collect::<Vec<_>>(),
            SnnScope::SharedNeighbors => self.two_hop_candidates(&index, pool),
        };

        let min_len = pool.min_batch(candidates.len());
        let refined: Vec<Edge> = pool.install(|| {
            candidates
                .par_iter()
                .with_min_len(min_len)
                .filter_map(|&(u, v)| {
                    let similarity = jaccard_sorted(index.of(u), index.of(v));
                    (similarity > 0.0 && self.retains(similarity)).then_some(Edge {
                        source: u,
                        target: v,
                        weight: similarity,
                    })
                })
                .collect()
        });

        let stats = SnnStats {
            candidate_pairs: candidates.len(),
            retained_edges: refined.len(),
            pruned_edges: candidates.len() - refined.len(),
            execution_time_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            candidates = stats.candidate_pairs,
            retained = stats.retained_edges,
            pruned = stats.pruned_edges,
            threshold = self.prune_threshold,
            elapsed_ms = stats.execution_time_ms,
            "SNN refinement complete"
        );

        (EdgeList::new(WeightKind::Jaccard, refined), stats)
    }

    fn two_hop_candidates(
        &self,
        index: &ClosedNeighborhoods,
        pool: &WorkerPool,
    ) -> Vec<(usize, usize)> {
        let n = index.n_nodes();
        let min_len = pool.min_batch(n);
        pool.install(|| {
            (0..n)
                .into_par_iter()
                .with_min_len(min_len)
                .flat_map_iter(|u| index.two_hop_above(u).into_iter().map(move |w| (u, w)))
                .collect()
        })
    }
}
