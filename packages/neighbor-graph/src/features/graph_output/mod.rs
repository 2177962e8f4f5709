//! Graph Assembly
//!
//! Final stage: symmetric sparse matrix in memory, or a persisted edge file.

pub mod assembler;
pub mod edge_file;
pub mod handle;
pub mod sparse_matrix;

pub use assembler::{BuildParams, GraphAssembler};
pub use edge_file::{read_edge_file, read_edges, write_edge_file, write_edges};
pub use handle::{GraphHandle, GraphMetadata, GraphSource, SourceKind};
pub use sparse_matrix::SparseAdjacency;
