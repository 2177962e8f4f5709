//! SNN Domain
//!
//! Pure similarity math with no dependency on the graph representation.

pub mod jaccard;

pub use jaccard::{jaccard_sorted, sorted_intersection_len};
