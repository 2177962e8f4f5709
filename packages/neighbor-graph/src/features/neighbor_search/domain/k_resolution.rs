//! Resolve the requested neighbor count against the point count

use crate::config::{ConfigError, RECOMMENDED_K_MAX, RECOMMENDED_K_MIN};
use crate::errors::{GraphError, Result};
use crate::shared::Advisory;

/// Effective k plus the advisories raised while resolving it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KResolution {
    pub requested: usize,
    pub k: usize,
    pub advisories: Vec<Advisory>,
}

/// Clamp `requested` to `n_points - 1` and collect advisories
///
/// Fewer than two points cannot form a neighborhood and fail the search.
pub fn resolve_k(requested: usize, n_points: usize) -> Result<KResolution> {
    if requested == 0 {
        return Err(ConfigError::range_with_hint(
            "k",
            requested,
            1,
            "N-1",
            "k must be a positive integer",
        )
        .into());
    }
    if n_points < 2 {
        return Err(GraphError::search(format!(
            "at least two points are required, got {}",
            n_points
        )));
    }

    let mut advisories = Vec::new();

    if !(RECOMMENDED_K_MIN..=RECOMMENDED_K_MAX).contains(&requested) {
        advisories.push(Advisory::KOutsideRecommended {
            k: requested,
            min: RECOMMENDED_K_MIN,
            max: RECOMMENDED_K_MAX,
        });
    }

    let k = if requested >= n_points {
        let effective = n_points - 1;
        advisories.push(Advisory::KClamped {
            requested,
            effective,
        });
        effective
    } else {
        requested
    };

    Ok(KResolution {
        requested,
        k,
        advisories,
    })
}
