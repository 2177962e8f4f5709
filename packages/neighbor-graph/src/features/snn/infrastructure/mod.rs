//! SNN Infrastructure

pub mod adjacency_index;
pub mod refiner;

pub use adjacency_index::ClosedNeighborhoods;
pub use refiner::{SnnRefiner, SnnStats};
