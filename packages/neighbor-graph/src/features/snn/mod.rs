//! Shared-Nearest-Neighbor Refinement
//!
//! Recomputes KNN edge weights as the Jaccard overlap of closed
//! neighborhoods, then prunes edges below the threshold.
//!
//! ```text
//! domain/ (Jaccard over sorted sets)
//!           ↓
//! infrastructure/ (closed-neighborhood CSR index, parallel refiner)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use crate::features::snn::SnnRefiner;
//!
//! let (snn_edges, stats) = SnnRefiner::from_config(&config.snn).refine(n, &knn_edges, &pool);
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{jaccard_sorted, sorted_intersection_len};
pub use infrastructure::{ClosedNeighborhoods, SnnRefiner, SnnStats};
