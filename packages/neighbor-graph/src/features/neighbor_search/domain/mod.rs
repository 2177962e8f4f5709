//! Neighbor Search Domain
//!
//! Backend-independent pieces: the `NeighborSearcher` port, k resolution
//! against the point count, and the bounded candidate heap both backends
//! share.

pub mod candidate_heap;
pub mod k_resolution;

pub use candidate_heap::CandidateHeap;
pub use k_resolution::{resolve_k, KResolution};

use crate::errors::Result;
use crate::shared::{Embedding, NeighborList, WorkerPool};

/// Port implemented by every search backend
pub trait NeighborSearcher: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// k nearest other points for every point of `embedding`
    ///
    /// `k` is already resolved (1 <= k < N). Each output row holds exactly
    /// k distinct indices, excludes the query point, and is sorted by
    /// ascending distance with ties broken by index.
    fn search_all(
        &self,
        embedding: &Embedding,
        k: usize,
        pool: &WorkerPool,
    ) -> Result<NeighborList>;
}
