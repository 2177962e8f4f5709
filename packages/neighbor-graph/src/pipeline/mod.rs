//! Pipeline orchestration

pub mod graph_pipeline;

pub use graph_pipeline::{build_graph, GraphBuildOutput, GraphPipeline, PipelineStats};
