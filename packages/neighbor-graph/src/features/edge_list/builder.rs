//! Edge List Builder
//!
//! Turns directed neighbor relations into undirected weighted edges.
//! Each directed pair (i, j) is canonicalized to (min, max); identical
//! canonical pairs are grouped and counted, so the weight is 1 for a
//! one-way relation and 2 for a mutual one.
//!
//! Grouping is done by sorting rather than hashing, which makes the output
//! order (and therefore the whole edge list) independent of how the
//! neighbor lists were produced.

use crate::shared::{Edge, EdgeList, NeighborList, WeightKind, WorkerPool};
use rayon::prelude::*;
use tracing::debug;

/// Counts gathered while building
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeListStats {
    /// Directed (i, j) relations read
    pub directed_pairs: usize,
    /// Edges observed in both directions
    pub mutual_edges: usize,
    /// Edges observed in one direction only
    pub one_way_edges: usize,
}

/// Builds the KNN edge list
#[derive(Debug, Default)]
pub struct EdgeListBuilder;

impl EdgeListBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Deduplicated, canonical edges weighted by direction count
    pub fn build(&self, neighbors: &NeighborList, pool: &WorkerPool) -> (EdgeList, EdgeListStats) {
        let mut pairs: Vec<(usize, usize)> = neighbors
            .iter()
            .flat_map(|(i, row)| {
                row.iter()
                    .filter_map(move |&j| Edge::canonical(i, j, 0.0).map(|e| e.key()))
            })
            .collect();

        let mut stats = EdgeListStats {
            directed_pairs: pairs.len(),
            ..Default::default()
        };

        pool.install(|| pairs.par_sort_unstable());

        let mut edges = Vec::with_capacity(pairs.len());
        let mut i = 0;
        while i < pairs.len() {
            let key = pairs[i];
            let mut run = 1;
            while i + run < pairs.len() && pairs[i + run] == key {
                run += 1;
            }
            debug_assert!(run <= 2, "a pair can be seen in at most two directions");
            if run >= 2 {
                stats.mutual_edges += 1;
            } else {
                stats.one_way_edges += 1;
            }
            edges.push(Edge {
                source: key.0,
                target: key.1,
                weight: run as f64,
            });
            i += run;
        }

        debug!(
            directed = stats.directed_pairs,
            mutual = stats.mutual_edges,
            one_way = stats.one_way_edges,
            "edge list built"
        );

        (EdgeList::new(WeightKind::Count, edges), stats)
    }
}
