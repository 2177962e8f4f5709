//! Neighbor Search UseCase
//!
//! Prepares the embedding (dimension selection, optional L2 normalization,
//! finiteness check), resolves k and runs the configured backend.

use crate::config::SearchConfig;
use crate::errors::Result;
use crate::features::neighbor_search::domain::{resolve_k, KResolution};
use crate::features::neighbor_search::infrastructure::searcher_for;
use crate::shared::{Embedding, NeighborList, WorkerPool};
use std::borrow::Cow;
use std::time::Instant;
use tracing::{debug, info};

/// Output from neighbor search
#[derive(Debug, Clone)]
pub struct NeighborSearchOutput {
    pub neighbors: NeighborList,
    pub resolution: KResolution,
    pub execution_time_ms: u64,
}

/// Apply dimension selection and normalization
pub fn prepare_embedding<'a>(
    embedding: &'a Embedding,
    config: &SearchConfig,
) -> Result<Cow<'a, Embedding>> {
    config.validate_dims(embedding.n_dims())?;

    let mut prepared = match &config.dims {
        Some(dims) => Cow::Owned(embedding.select_dims(dims)?),
        None => Cow::Borrowed(embedding),
    };
    if config.l2_norm {
        prepared = Cow::Owned(prepared.l2_normalized());
    }
    prepared.ensure_finite()?;
    Ok(prepared)
}

/// Find the k nearest neighbors of every point
pub fn search_neighbors(
    embedding: &Embedding,
    config: &SearchConfig,
    pool: &WorkerPool,
) -> Result<NeighborSearchOutput> {
    let start = Instant::now();

    let prepared = prepare_embedding(embedding, config)?;
    let resolution = resolve_k(config.k, prepared.n_points())?;

    let searcher = searcher_for(config);
    debug!(
        backend = searcher.name(),
        points = prepared.n_points(),
        dims = prepared.n_dims(),
        k = resolution.k,
        eps = config.eps,
        "starting neighbor search"
    );

    let neighbors = searcher.search_all(&prepared, resolution.k, pool)?;
    let execution_time_ms = start.elapsed().as_millis() as u64;

    info!(
        backend = searcher.name(),
        points = neighbors.n_points(),
        k = resolution.k,
        elapsed_ms = execution_time_ms,
        "neighbor search complete"
    );

    Ok(NeighborSearchOutput {
        neighbors,
        resolution,
        execution_time_ms,
    })
}
