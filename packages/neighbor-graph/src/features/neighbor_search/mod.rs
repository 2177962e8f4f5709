//! Nearest Neighbor Search
//!
//! For every point, its k nearest other points by Euclidean distance.
//!
//! # Hexagonal Architecture
//!
//! ```text
//! application/ (search_neighbors - entry point)
//!           ↓
//! domain/ (NeighborSearcher port, k resolution, candidate heap)
//!           ↓
//! infrastructure/ (kd-tree, brute force)
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{prepare_embedding, search_neighbors, NeighborSearchOutput};
pub use domain::{resolve_k, CandidateHeap, KResolution, NeighborSearcher};
pub use infrastructure::{searcher_for, BruteForceSearcher, KdTree, KdTreeSearcher};
