//! Graph Assembler
//!
//! Materializes the final edge list in the configured output mode. In file
//! mode the in-memory matrix is never built.

use super::edge_file::write_edge_file;
use super::handle::{GraphHandle, GraphMetadata, GraphSource, SourceKind};
use super::sparse_matrix::SparseAdjacency;
use crate::config::OutputMode;
use crate::errors::Result;
use crate::shared::EdgeList;
use tracing::info;

/// Parameters recorded on the handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildParams {
    pub k: usize,
    pub snn: bool,
    pub prune_threshold: f64,
}

#[derive(Debug, Default)]
pub struct GraphAssembler;

impl GraphAssembler {
    pub fn new() -> Self {
        Self
    }

    pub fn assemble(
        &self,
        edges: EdgeList,
        n_nodes: usize,
        output: &OutputMode,
        params: BuildParams,
    ) -> Result<GraphHandle> {
        let n_edges = edges.len();
        let weight_kind = edges.kind();

        let (source, source_kind) = match output {
            OutputMode::InMemory => {
                let matrix = SparseAdjacency::from_edges(n_nodes, &edges);
                info!(nodes = n_nodes, nnz = matrix.nnz(), "assembled in-memory graph");
                (GraphSource::Matrix(matrix), SourceKind::Matrix)
            }
            OutputMode::File { path } => {
                write_edge_file(path, &edges)?;
                info!(path = %path.display(), edges = n_edges, "wrote edge file");
                (
                    GraphSource::File(path.clone()),
                    SourceKind::File { path: path.clone() },
                )
            }
        };

        Ok(GraphHandle {
            metadata: GraphMetadata {
                k: params.k,
                snn: params.snn,
                prune_threshold: params.prune_threshold,
                weight_kind,
                n_nodes,
                n_edges,
                source: source_kind,
            },
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{Edge, WeightKind};

    fn params() -> BuildParams {
        BuildParams {
            k: 3,
            snn: false,
            prune_threshold: 0.0,
        }
    }

    fn edges() -> EdgeList {
        EdgeList::new(
            WeightKind::Count,
            vec![
                Edge::canonical(0, 1, 2.0).unwrap(),
                Edge::canonical(1, 2, 1.0).unwrap(),
            ],
        )
    }

    #[test]
    fn test_in_memory_handle() {
        let handle = GraphAssembler::new()
            .assemble(edges(), 3, &OutputMode::InMemory, params())
            .unwrap();
        assert_eq!(handle.metadata.source, SourceKind::Matrix);
        assert_eq!(handle.metadata.n_edges, 2);
        assert!(handle.path().is_none());
        let m = handle.matrix().unwrap();
        assert_eq!(m.get(2, 1), 1.0);
        assert_eq!(handle.edges().unwrap(), edges());
    }

    #[test]
    fn test_file_handle_has_no_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g.tsv");
        let handle = GraphAssembler::new()
            .assemble(edges(), 3, &OutputMode::file(&path), params())
            .unwrap();
        assert!(handle.matrix().is_none());
        assert_eq!(handle.path(), Some(path.as_path()));
        assert_eq!(
            handle.metadata.source,
            SourceKind::File { path: path.clone() }
        );
        assert_eq!(handle.edges().unwrap(), edges());
    }

    #[test]
    fn test_metadata_serializes() {
        let handle = GraphAssembler::new()
            .assemble(edges(), 3, &OutputMode::InMemory, params())
            .unwrap();
        let json = serde_json::to_value(&handle.metadata).unwrap();
        assert_eq!(json["k"], 3);
        assert_eq!(json["weight_kind"], "count");
        assert_eq!(json["source"]["type"], "matrix");
    }
}
