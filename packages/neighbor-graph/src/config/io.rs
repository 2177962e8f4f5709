//! Configuration I/O (YAML loading)
//!
//! Defines YAML schema types. Loading and export live in graph_config.rs.

use super::stage_configs::{OutputMode, ParallelConfig, SearchConfig, SnnConfig};
use serde::{Deserialize, Serialize};

/// Supported schema versions
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    pub version: u32,

    /// Base preset
    #[serde(default = "default_preset")]
    pub preset: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snn: Option<SnnConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<ParallelConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_neighbors: Option<bool>,
}

fn default_preset() -> String {
    "balanced".to_string()
}
