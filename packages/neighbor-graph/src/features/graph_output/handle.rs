//! Graph handle returned by the pipeline

use super::edge_file::read_edge_file;
use super::sparse_matrix::SparseAdjacency;
use crate::errors::Result;
use crate::shared::{EdgeList, WeightKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the graph lives
#[derive(Debug, Clone, PartialEq)]
pub enum GraphSource {
    Matrix(SparseAdjacency),
    File(PathBuf),
}

/// Serializable summary of a graph source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceKind {
    Matrix,
    File { path: PathBuf },
}

/// Build parameters and shape of the produced graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphMetadata {
    /// Effective neighbor count
    pub k: usize,
    pub snn: bool,
    pub prune_threshold: f64,
    pub weight_kind: WeightKind,
    pub n_nodes: usize,
    pub n_edges: usize,
    pub source: SourceKind,
}

/// Final graph plus metadata
#[derive(Debug, Clone, PartialEq)]
pub struct GraphHandle {
    pub metadata: GraphMetadata,
    pub source: GraphSource,
}

impl GraphHandle {
    /// In-memory matrix, if this graph was not written to a file
    pub fn matrix(&self) -> Option<&SparseAdjacency> {
        match &self.source {
            GraphSource::Matrix(m) => Some(m),
            GraphSource::File(_) => None,
        }
    }

    /// Edge file path, if this graph was written to a file
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            GraphSource::File(p) => Some(p.as_path()),
            GraphSource::Matrix(_) => None,
        }
    }

    /// Edge list regardless of where the graph lives
    pub fn edges(&self) -> Result<EdgeList> {
        match &self.source {
            GraphSource::Matrix(m) => Ok(m.to_edge_list()),
            GraphSource::File(p) => read_edge_file(p, self.metadata.weight_kind),
        }
    }
}
