//! kd-tree neighbor search
//!
//! Bucketed kd-tree split on the dimension of largest spread at the median
//! point. Queries descend the near side first and visit the far side only
//! when its incremental lower bound can still beat the current k-th
//! candidate.
//!
//! # Approximation
//! ```text
//! visit far cell  iff  lower_bound² · (1 + eps)² <= kth² · (1 + slack)
//! ```
//! With eps = 0 this is exact (ties at the bound are still visited). With
//! eps > 0 every pruned point is farther than kth / (1 + eps), so the i-th
//! returned distance is within a (1 + eps) factor of the true i-th distance.

use crate::errors::{GraphError, Result};
use crate::features::neighbor_search::domain::{CandidateHeap, NeighborSearcher};
use crate::shared::{squared_euclidean, Embedding, NeighborList, WorkerPool};
use rayon::prelude::*;
use tracing::debug;

/// Points per leaf bucket
const LEAF_SIZE: usize = 8;

/// Relative slack on the pruning test
///
/// The incremental bound and the leaf distance round differently, so a
/// point tied exactly with the k-th candidate can get a bound a few ulps
/// above it. Leaves compute true distances, so the slack only costs visits.
const BOUND_SLACK: f64 = 1.0 + 1e-9;

#[derive(Debug, Clone)]
enum KdNode {
    Leaf {
        start: usize,
        end: usize,
    },
    Split {
        dim: usize,
        value: f64,
        left: usize,
        right: usize,
    },
}

/// Static kd-tree over one embedding
#[derive(Debug, Clone)]
pub struct KdTree<'a> {
    embedding: &'a Embedding,
    /// Point indices, permuted so every leaf owns a contiguous range
    order: Vec<usize>,
    nodes: Vec<KdNode>,
}

impl<'a> KdTree<'a> {
    /// Build over all points of `embedding`
    pub fn build(embedding: &'a Embedding) -> Self {
        let mut tree = Self {
            embedding,
            order: (0..embedding.n_points()).collect(),
            nodes: Vec::new(),
        };
        tree.build_node(0, embedding.n_points());
        tree
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn build_node(&mut self, start: usize, end: usize) -> usize {
        let id = self.nodes.len();
        self.nodes.push(KdNode::Leaf { start, end });

        if end - start <= LEAF_SIZE {
            return id;
        }

        let (dim, spread) = self.widest_dimension(start, end);
        if spread <= 0.0 {
            // All points identical; nothing to split on
            return id;
        }

        let mid = start + (end - start) / 2;
        let embedding = self.embedding;
        self.order[start..end].select_nth_unstable_by(mid - start, |&a, &b| {
            embedding.get(a, dim).total_cmp(&embedding.get(b, dim))
        });
        let value = embedding.get(self.order[mid], dim);

        let left = self.build_node(start, mid);
        let right = self.build_node(mid, end);
        self.nodes[id] = KdNode::Split {
            dim,
            value,
            left,
            right,
        };
        id
    }

    fn widest_dimension(&self, start: usize, end: usize) -> (usize, f64) {
        let mut best = (0, f64::NEG_INFINITY);
        for dim in 0..self.embedding.n_dims() {
            let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
            for &p in &self.order[start..end] {
                let v = self.embedding.get(p, dim);
                lo = lo.min(v);
                hi = hi.max(v);
            }
            if hi - lo > best.1 {
                best = (dim, hi - lo);
            }
        }
        best
    }

    /// k nearest neighbors of stored point `query`, excluding itself
    pub fn query_point(&self, query: usize, k: usize, eps: f64) -> CandidateHeap {
        let q = self.embedding.row(query);
        let mut heap = CandidateHeap::new(k);
        let mut offsets = vec![0.0; self.embedding.n_dims()];
        let factor = (1.0 + eps) * (1.0 + eps);
        if !self.nodes.is_empty() {
            self.search(0, query, q, 0.0, &mut offsets, factor, &mut heap);
        }
        heap
    }

    #[allow(clippy::too_many_arguments)]
    fn search(
        &self,
        node: usize,
        query: usize,
        q: &[f64],
        lower_bound: f64,
        offsets: &mut [f64],
        factor: f64,
        heap: &mut CandidateHeap,
    ) {
        match self.nodes[node] {
            KdNode::Leaf { start, end } => {
                for &p in &self.order[start..end] {
                    if p != query {
                        heap.push(p, squared_euclidean(q, self.embedding.row(p)));
                    }
                }
            }
            KdNode::Split {
                dim,
                value,
                left,
                right,
            } => {
                let diff = q[dim] - value;
                let (near, far) = if diff <= 0.0 {
                    (left, right)
                } else {
                    (right, left)
                };

                self.search(near, query, q, lower_bound, offsets, factor, heap);

                let old = offsets[dim];
                let far_bound = lower_bound - old * old + diff * diff;
                if far_bound * factor <= heap.worst() * BOUND_SLACK {
                    offsets[dim] = diff;
                    self.search(far, query, q, far_bound, offsets, factor, heap);
                    offsets[dim] = old;
                }
            }
        }
    }
}

/// kd-tree backed searcher
#[derive(Debug, Clone, Copy, Default)]
pub struct KdTreeSearcher {
    eps: f64,
}

impl KdTreeSearcher {
    /// Exact search
    pub fn exact() -> Self {
        Self { eps: 0.0 }
    }

    /// Approximate search with tolerance `eps` (negative values act as 0)
    pub fn with_eps(eps: f64) -> Self {
        Self { eps: eps.max(0.0) }
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }
}

impl NeighborSearcher for KdTreeSearcher {
    fn name(&self) -> &'static str {
        "kd_tree"
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

        let tree = KdTree::build(embedding);
        debug!(nodes = tree.node_count(), points = n, "kd-tree built");

        let min_len = pool.min_batch(n);
        let eps = self.eps;
        let rows = pool.install(|| {
            (0..n)
                .into_par_iter()
                .with_min_len(min_len)
                .map(|i| {
                    let heap = tree.query_point(i, k, eps);
                    if heap.len() != k {
                        return Err(GraphError::search(format!(
                            "point {} received {} neighbors, expected {}",
                            i + 1,
                            heap.len(),
                            k
                        )));
                    }
                    Ok(heap.into_sorted())
                })
                .collect::<Result<Vec<_>>>()
        })?;

        Ok(NeighborList::from_rows(k, rows))
    }
}
