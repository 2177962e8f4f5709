//! Preset configurations
//!
//! Presets provide complete default configurations for common use cases.

use serde::{Deserialize, Serialize};

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Large datasets: approximate kd-tree search
    ///
    /// - k=20, eps=0.5
    /// - SNN on, prune 1/15
    Fast,

    /// Default: exact kd-tree search
    ///
    /// - k=20, eps=0
    /// - SNN on, prune 1/15
    #[default]
    Balanced,

    /// Reference: brute-force search, no kd-tree
    ///
    /// - k=20, eps=0
    /// - SNN on, prune 1/15
    Exact,
}

impl Preset {
    /// Parse preset from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "balanced" => Ok(Self::Balanced),
            "exact" => Ok(Self::Exact),
            _ => Err(format!("Unknown preset: {}", s)),
        }
    }

    /// Lowercase name as used in YAML
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Exact => "exact",
        }
    }

    /// Approximation tolerance for this preset
    pub fn eps(&self) -> f64 {
        match self {
            Self::Fast => 0.5,
            Self::Balanced | Self::Exact => 0.0,
        }
    }
}
