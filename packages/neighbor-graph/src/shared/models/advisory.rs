//! Non-fatal advisories
//!
//! Surfaced to the caller alongside the graph; they never block execution.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// Requested k was not below the point count and was reduced to N-1
    KClamped { requested: usize, effective: usize },
    /// Requested k lies outside the recommended range
    KOutsideRecommended { k: usize, min: usize, max: usize },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::KClamped {
                requested,
                effective,
            } => write!(
                f,
                "k={} is not smaller than the number of points; using k={}",
                requested, effective
            ),
            Advisory::KOutsideRecommended { k, min, max } => write!(
                f,
                "k={} is outside the recommended range {}..={}",
                k, min, max
            ),
        }
    }
}
