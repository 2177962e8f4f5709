//! Stage-specific configuration types
//!
//! Each pipeline stage has its own configuration struct with validation.

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::validation::{ensure_writable, Validatable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Smallest k that does not trigger a range advisory
pub const RECOMMENDED_K_MIN: usize = 10;
/// Largest k that does not trigger a range advisory
pub const RECOMMENDED_K_MAX: usize = 50;

fn default_k() -> usize {
    20
}
fn default_prune_threshold() -> f64 {
    1.0 / 15.0
}
fn default_true() -> bool {
    true
}

// ============================================================================
// Neighbor Search Configuration
// ============================================================================

/// Neighbor search backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMethod {
    /// kd-tree with optional (1+eps) approximation
    #[default]
    KdTree,
    /// Exhaustive scan (always exact, eps is ignored)
    BruteForce,
}

/// Neighbor search configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Neighbors per point (>= 1; clamped to N-1 at run time)
    #[serde(default = "default_k")]
    pub k: usize,

    /// Approximation tolerance (0 = exact)
    pub eps: f64,

    /// Search backend
    pub method: SearchMethod,

    /// 1-indexed embedding dimensions to use (None = all)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dims: Option<Vec<usize>>,

    /// L2-normalize each point before searching
    pub l2_norm: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

impl SearchConfig {
    /// Get preset configuration
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            k: default_k(),
            eps: preset.eps(),
            method: match preset {
                Preset::Exact => SearchMethod::BruteForce,
                Preset::Fast | Preset::Balanced => SearchMethod::KdTree,
            },
            dims: None,
            l2_norm: false,
        }
    }

    /// Set k
    pub fn k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set eps
    pub fn eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Set search backend
    pub fn method(mut self, method: SearchMethod) -> Self {
        self.method = method;
        self
    }

    /// Restrict the search to these 1-indexed dimensions
    pub fn dims(mut self, dims: Vec<usize>) -> Self {
        self.dims = Some(dims);
        self
    }

    /// Enable or disable per-point L2 normalization
    pub fn l2_norm(mut self, enabled: bool) -> Self {
        self.l2_norm = enabled;
        self
    }

    /// True when k lies outside the recommended range
    pub fn k_outside_recommended(&self) -> bool {
        !(RECOMMENDED_K_MIN..=RECOMMENDED_K_MAX).contains(&self.k)
    }

    /// Check the dimension selection against an embedding width
    pub fn validate_dims(&self, available: usize) -> ConfigResult<()> {
        if let Some(dims) = &self.dims {
            if let Some(&max) = dims.iter().max() {
                if max > available {
                    return Err(ConfigError::DimensionOutOfBounds {
                        requested: max,
                        available,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Validatable for SearchConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.k == 0 {
            return Err(ConfigError::range_with_hint(
                "k",
                self.k,
                1,
                "N-1",
                "k must be a positive integer",
            ));
        }

        if !self.eps.is_finite() || self.eps < 0.0 {
            return Err(ConfigError::range_with_hint(
                "eps",
                self.eps,
                0,
                "inf",
                "Use 0 for exact search",
            ));
        }

        if let Some(dims) = &self.dims {
            if dims.is_empty() {
                return Err(ConfigError::InvalidDimensions(
                    "selection is empty".to_string(),
                ));
            }
            if dims.contains(&0) {
                return Err(ConfigError::InvalidDimensions(
                    "dimensions are 1-indexed, 0 is not valid".to_string(),
                ));
            }
            let mut seen = HashSet::with_capacity(dims.len());
            if let Some(dup) = dims.iter().find(|d| !seen.insert(**d)) {
                return Err(ConfigError::InvalidDimensions(format!(
                    "dimension {} selected more than once",
                    dup
                )));
            }
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "search"
    }
}

// ============================================================================
// SNN Configuration
// ============================================================================

/// Which pairs receive a neighborhood-overlap similarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnnScope {
    /// Only pairs that are already KNN edges
    #[default]
    KnnEdges,
    /// Every pair whose closed neighborhoods intersect
    SharedNeighbors,
}

/// Shared-nearest-neighbor refinement configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnnConfig {
    /// Run the SNN refinement stage
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Edges with Jaccard below this value are dropped (0.0..=1.0)
    #[serde(default = "default_prune_threshold")]
    pub prune_threshold: f64,

    /// Candidate pair scope
    pub scope: SnnScope,
}

impl Default for SnnConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prune_threshold: default_prune_threshold(),
            scope: SnnScope::KnnEdges,
        }
    }
}

impl SnnConfig {
    /// Enable or disable the stage
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set prune threshold
    pub fn prune_threshold(mut self, threshold: f64) -> Self {
        self.prune_threshold = threshold;
        self
    }

    /// Set candidate scope
    pub fn scope(mut self, scope: SnnScope) -> Self {
        self.scope = scope;
        self
    }
}

impl Validatable for SnnConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !(0.0..=1.0).contains(&self.prune_threshold) {
            return Err(ConfigError::range_with_hint(
                "prune_threshold",
                self.prune_threshold,
                0.0,
                1.0,
                "Jaccard similarity is bounded by [0, 1]",
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "snn"
    }
}

// ============================================================================
// Parallel Configuration
// ============================================================================

/// Worker pool configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Number of workers (0=auto, 1..=256)
    pub num_workers: usize,
}

impl ParallelConfig {
    /// Fixed worker count
    pub fn with_workers(num_workers: usize) -> Self {
        Self { num_workers }
    }
}

impl Validatable for ParallelConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.num_workers > 256 {
            return Err(ConfigError::range_with_hint(
                "num_workers",
                self.num_workers,
                0,
                256,
                "Number of workers must be reasonable (0=auto)",
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "parallel"
    }
}

// ============================================================================
// Output Configuration
// ============================================================================

/// Where the assembled graph goes
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum OutputMode {
    /// Symmetric sparse matrix returned to the caller
    #[default]
    InMemory,
    /// Tab-separated edge list written to `path`
    File { path: PathBuf },
}

impl OutputMode {
    /// File output at `path`
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }
}

impl Validatable for OutputMode {
    fn validate(&self) -> ConfigResult<()> {
        match self {
            Self::InMemory => Ok(()),
            Self::File { path } => ensure_writable(path),
        }
    }

    fn config_name(&self) -> &'static str {
        "output"
    }
}
