//! Search backends

pub mod brute_force;
pub mod kd_tree;

pub use brute_force::BruteForceSearcher;
pub use kd_tree::{KdTree, KdTreeSearcher};

use crate::config::{SearchConfig, SearchMethod};
use crate::features::neighbor_search::domain::NeighborSearcher;

/// Backend selected by configuration
pub fn searcher_for(config: &SearchConfig) -> Box<dyn NeighborSearcher> {
    match config.method {
        SearchMethod::KdTree => Box::new(KdTreeSearcher::with_eps(config.eps)),
        SearchMethod::BruteForce => Box::new(BruteForceSearcher::new()),
    }
}
