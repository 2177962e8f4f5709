//! Shared data models passed between pipeline stages

pub mod advisory;
pub mod edge;
pub mod embedding;
pub mod neighbor_list;

pub use advisory::Advisory;
pub use edge::{Edge, EdgeList, WeightKind};
pub use embedding::{squared_euclidean, Embedding};
pub use neighbor_list::{Neighbor, NeighborList};
