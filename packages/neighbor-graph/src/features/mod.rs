//! Feature modules, one per pipeline stage
//!
//! ```text
//! neighbor_search → edge_list → [snn] → graph_output
//! ```

pub mod edge_list;
pub mod graph_output;
pub mod neighbor_search;
pub mod snn;
