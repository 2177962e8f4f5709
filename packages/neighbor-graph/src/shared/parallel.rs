//! Injected worker pool
//!
//! Parallel stages never touch Rayon's global pool. The pipeline receives a
//! `WorkerPool` and runs every parallel section through `install`, so the
//! worker count is an explicit input and tests can pin it.
//!
//! Results are merged with order-preserving `collect`, which keeps output
//! independent of worker completion order.

use crate::config::ParallelConfig;
use crate::errors::{GraphError, Result};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::Arc;

/// Target CPU utilization when the worker count is automatic
const TARGET_UTILIZATION: f64 = 0.85;

/// Shared handle to a dedicated Rayon pool
#[derive(Clone)]
pub struct WorkerPool {
    pool: Arc<ThreadPool>,
    num_workers: usize,
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("num_workers", &self.num_workers)
            .finish()
    }
}

impl WorkerPool {
    /// Create a pool with `num_workers` threads (0 = auto)
    pub fn new(num_workers: usize) -> Result<Self> {
        let num_workers = if num_workers == 0 {
            Self::auto_workers()
        } else {
            num_workers
        };

        let pool = ThreadPoolBuilder::new()
            .num_threads(num_workers)
            .thread_name(|i| format!("neighbor-graph-worker-{}", i))
            .build()
            .map_err(|e| GraphError::WorkerPool(format!("Failed to configure thread pool: {}", e)))?;

        Ok(Self {
            pool: Arc::new(pool),
            num_workers,
        })
    }

    /// Single-threaded pool
    pub fn sequential() -> Result<Self> {
        Self::new(1)
    }

    /// Pool sized from configuration
    pub fn from_config(config: &ParallelConfig) -> Result<Self> {
        Self::new(config.num_workers)
    }

    /// Worker count used when none is configured
    pub fn auto_workers() -> usize {
        let cpus = num_cpus::get();
        ((cpus as f64 * TARGET_UTILIZATION).ceil() as usize).clamp(1, cpus.max(1))
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Run `op` inside the pool
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }

    /// Minimum items per Rayon task for `total` items
    ///
    /// Aims for about four tasks per worker so work stealing can balance
    /// uneven per-item cost.
    pub fn min_batch(&self, total: usize) -> usize {
        const MIN_BATCH: usize = 16;
        const MAX_BATCH: usize = 4096;
        let per_task = total.div_ceil(self.num_workers * 4);
        per_task.clamp(MIN_BATCH, MAX_BATCH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn test_fixed_worker_count() {
        let pool = WorkerPool::new(3).unwrap();
        assert_eq!(pool.num_workers(), 3);
        assert_eq!(pool.install(rayon::current_num_threads), 3);
    }

    #[test]
    fn test_auto_workers_positive() {
        let pool = WorkerPool::new(0).unwrap();
        assert!(pool.num_workers() >= 1);
        assert!(pool.num_workers() <= num_cpus::get().max(1));
    }

    #[test]
    fn test_install_preserves_order() {
        let pool = WorkerPool::new(4).unwrap();
        let out: Vec<usize> = pool.install(|| (0..1000).into_par_iter().map(|i| i * 2).collect());
        assert_eq!(out, (0..1000).map(|i| i * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_min_batch_bounds() {
        let pool = WorkerPool::new(2).unwrap();
        assert_eq!(pool.min_batch(0), 16);
        assert_eq!(pool.min_batch(1_000_000_000), 4096);
        assert_eq!(pool.min_batch(800), 100);
    }
}
