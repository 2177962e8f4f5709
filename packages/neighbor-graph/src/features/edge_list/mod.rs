//! KNN edge list construction
//!
//! Symmetrizes per-point neighbor lists into canonical `(u, v, count)` edges.

pub mod builder;

pub use builder::{EdgeListBuilder, EdgeListStats};
