//! Graph construction pipeline
//!
//! ```text
//! ValidatedConfig → NeighborSearch → EdgeListBuilder → [SnnRefiner] → GraphAssembler
//! ```
//!
//! Strictly linear. Any stage error aborts the run and nothing is returned
//! except the error; a file target is only replaced after the last stage
//! succeeds.

use crate::config::{GraphConfig, ValidatedConfig};
use crate::errors::{GraphError, Result};
use crate::features::edge_list::{EdgeListBuilder, EdgeListStats};
use crate::features::graph_output::{BuildParams, GraphAssembler, GraphHandle};
use crate::features::neighbor_search::search_neighbors;
use crate::features::snn::{SnnRefiner, SnnStats};
use crate::shared::{Advisory, Embedding, NeighborList, WorkerPool};
use std::time::Instant;
use tracing::{info, warn};

/// Per-stage counts and timings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineStats {
    pub n_points: usize,
    pub n_dims: usize,
    pub k: usize,
    pub search_time_ms: u64,
    pub edge_list: EdgeListStats,
    pub knn_edges: usize,
    /// Present when SNN refinement ran
    pub snn: Option<SnnStats>,
    pub final_edges: usize,
    pub execution_time_ms: u64,
}

/// Everything a successful run returns
#[derive(Debug, Clone)]
pub struct GraphBuildOutput {
    pub handle: GraphHandle,
    pub advisories: Vec<Advisory>,
    /// Neighbor lists, kept only when `return_neighbors` is set
    pub neighbors: Option<NeighborList>,
    pub stats: PipelineStats,
}

/// Configured pipeline bound to a worker pool
#[derive(Debug, Clone)]
pub struct GraphPipeline {
    config: ValidatedConfig,
    pool: WorkerPool,
}

impl GraphPipeline {
    /// Pipeline running on an explicitly provided pool
    pub fn new(config: ValidatedConfig, pool: WorkerPool) -> Self {
        Self { config, pool }
    }

    /// Pipeline with a pool sized from `config.parallel`
    pub fn from_config(config: ValidatedConfig) -> Result<Self> {
        let pool = WorkerPool::from_config(&config.parallel)?;
        Ok(Self::new(config, pool))
    }

    pub fn config(&self) -> &GraphConfig {
        self.config.as_inner()
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Run on the output of an upstream reduction that may not exist yet
    pub fn run_from_reduction(&self, embedding: Option<&Embedding>) -> Result<GraphBuildOutput> {
        match embedding {
            Some(embedding) => self.run(embedding),
            None => Err(GraphError::prerequisite(
                "no embedding available; run dimensionality reduction first",
            )),
        }
    }

    /// Build the graph for `embedding`
    pub fn run(&self, embedding: &Embedding) -> Result<GraphBuildOutput> {
        let start = Instant::now();
        let config = self.config();
        let n_points = embedding.n_points();

        info!(
            points = n_points,
            dims = embedding.n_dims(),
            k = config.search.k,
            snn = config.snn.enabled,
            workers = self.pool.num_workers(),
            "building neighbor graph"
        );

        // Stage 1: neighbor search
        let search = search_neighbors(embedding, &config.search, &self.pool)?;
        for advisory in &search.resolution.advisories {
            warn!(%advisory, "neighbor search advisory");
        }
        let k = search.resolution.k;

        // Stage 2: edge list
        let (knn_edges, edge_list_stats) = EdgeListBuilder::new().build(&search.neighbors, &self.pool);
        let knn_edge_count = knn_edges.len();

        // Stage 3: optional SNN refinement
        let (final_edges, snn_stats) = if config.snn.enabled {
            let refiner = SnnRefiner::from_config(&config.snn);
            let (edges, stats) = refiner.refine(n_points, &knn_edges, &self.pool);
            (edges, Some(stats))
        } else {
            (knn_edges, None)
        };
        let final_edge_count = final_edges.len();

        // Stage 4: assembly
        let handle = GraphAssembler::new().assemble(
            final_edges,
            n_points,
            &config.output,
            BuildParams {
                k,
                snn: config.snn.enabled,
                prune_threshold: config.snn.prune_threshold,
            },
        )?;

        let stats = PipelineStats {
            n_points,
            n_dims: embedding.n_dims(),
            k,
            search_time_ms: search.execution_time_ms,
            edge_list: edge_list_stats,
            knn_edges: knn_edge_count,
            snn: snn_stats,
            final_edges: final_edge_count,
            execution_time_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            edges = stats.final_edges,
            knn_edges = stats.knn_edges,
            elapsed_ms = stats.execution_time_ms,
            "neighbor graph complete"
        );

        Ok(GraphBuildOutput {
            handle,
            advisories: search.resolution.advisories,
            neighbors: config.return_neighbors.then_some(search.neighbors),
            stats,
        })
    }
}

/// Validate `config`, size a pool from it and run once
pub fn build_graph(embedding: &Embedding, config: GraphConfig) -> Result<GraphBuildOutput> {
    GraphPipeline::from_config(config.build()?)?.run(embedding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutputMode, Preset};
    use crate::shared::WeightKind;

    fn line() -> Embedding {
        Embedding::from_column(&[0.0, 1.0, 2.0, 3.0]).unwrap()
    }

    #[test]
    fn test_knn_only_line() {
        let out = build_graph(&line(), GraphConfig::default().k(1).snn_enabled(false)).unwrap();
        let m = out.handle.matrix().unwrap();
        assert_eq!(m.get(0, 1), 2.0);
        assert_eq!(m.get(1, 2), 1.0);
        assert_eq!(m.get(2, 3), 1.0);
        assert_eq!(out.handle.metadata.weight_kind, WeightKind::Count);
        assert!(out.stats.snn.is_none());
        assert!(out.neighbors.is_none());
    }

    #[test]
    fn test_snn_metadata_recorded() {
        let out = build_graph(&line(), GraphConfig::default().k(2).prune_threshold(0.0)).unwrap();
        let meta = &out.handle.metadata;
        assert!(meta.snn);
        assert_eq!(meta.k, 2);
        assert_eq!(meta.prune_threshold, 0.0);
        assert_eq!(meta.weight_kind, WeightKind::Jaccard);
        assert_eq!(out.stats.snn.unwrap().pruned_edges, 0);
    }

    #[test]
    fn test_missing_embedding_is_prerequisite_error() {
        let pipeline = GraphPipeline::from_config(GraphConfig::default().build().unwrap()).unwrap();
        let err = pipeline.run_from_reduction(None).unwrap_err();
        assert!(matches!(err, GraphError::Prerequisite(_)));
    }

    #[test]
    fn test_return_neighbors() {
        let out = build_graph(
            &line(),
            GraphConfig::preset(Preset::Exact).k(1).return_neighbors(true),
        )
        .unwrap();
        let neighbors = out.neighbors.unwrap();
        assert_eq!(neighbors.neighbors(3), &[2]);
    }

    #[test]
    fn test_search_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.tsv");
        let bad = Embedding::from_column(&[0.0, f64::NAN, 1.0]).unwrap();
        let err = build_graph(&bad, GraphConfig::default().output(OutputMode::file(&path)))
            .unwrap_err();
        assert!(matches!(err, GraphError::SearchFailure(_)));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
