/*
 * Neighbor Graph - KNN/SNN similarity graph construction
 *
 * Feature-First Hexagonal Architecture:
 * - config/      : Presets, stage configs, YAML import/export, validation
 * - shared/      : Common models (Embedding, NeighborList, EdgeList), worker pool
 * - features/    : Vertical slices (neighbor_search → edge_list → snn → graph_output)
 * - pipeline/    : Orchestration
 *
 * Performance:
 * - kd-tree search, optional (1+eps) approximation
 * - Rayon work-stealing on an injected pool
 * - Deterministic output regardless of worker count
 */

#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::needless_range_loop)] // Range loop for indexing

pub mod config;
pub mod errors;
pub mod features;
pub mod pipeline;
pub mod shared;

pub use config::{GraphConfig, OutputMode, Preset, SearchMethod, SnnScope, ValidatedConfig};
pub use errors::{GraphError, Result};
pub use features::graph_output::{GraphHandle, GraphMetadata, SparseAdjacency};
pub use pipeline::{build_graph, GraphBuildOutput, GraphPipeline, PipelineStats};
pub use shared::{Advisory, Edge, EdgeList, Embedding, NeighborList, WeightKind, WorkerPool};
