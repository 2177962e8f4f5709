//! Configuration System
//!
//! Two tiers:
//! - Level 1: Preset + builder overrides
//! - Level 2: YAML v1 file
//!
//! # Examples
//!
//! ```rust,ignore
//! use neighbor_graph::config::{GraphConfig, OutputMode, Preset};
//!
//! let config = GraphConfig::preset(Preset::Balanced)
//!     .search(|c| c.k(30).dims((1..=20).collect()))
//!     .prune_threshold(0.1)
//!     .output(OutputMode::file("graph.tsv"))
//!     .build()?;
//!
//! let config = GraphConfig::from_yaml("graph.yaml")?.build()?;
//! ```

pub mod error;
pub mod graph_config;
pub mod io;
pub mod preset;
pub mod stage_configs;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use graph_config::{GraphConfig, ValidatedConfig};
pub use io::ConfigExportV1;
pub use preset::Preset;
pub use stage_configs::{
    OutputMode, ParallelConfig, SearchConfig, SearchMethod, SnnConfig, SnnScope,
    RECOMMENDED_K_MAX, RECOMMENDED_K_MIN,
};
pub use validation::{ensure_writable, Validatable};
