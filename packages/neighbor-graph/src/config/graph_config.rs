//! Graph construction configuration
//!
//! Main configuration struct with preset-based defaults and override support.
//! `build()` validates everything that can be checked without the embedding,
//! including writability of a file target, and returns a `ValidatedConfig`
//! that the pipeline accepts.

use super::{
    error::{ConfigError, ConfigResult},
    io::{ConfigExportV1, SUPPORTED_VERSIONS},
    preset::Preset,
    stage_configs::*,
    validation::Validatable,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_yaml::Value;
use std::path::Path;

/// Complete configuration for one graph build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    pub preset: Preset,
    pub search: SearchConfig,
    pub snn: SnnConfig,
    pub parallel: ParallelConfig,
    pub output: OutputMode,
    /// Keep the neighbor lists in the pipeline output
    pub return_neighbors: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::preset(Preset::Balanced)
    }
}

impl GraphConfig {
    /// Start from a preset
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            search: SearchConfig::from_preset(preset),
            snn: SnnConfig::default(),
            parallel: ParallelConfig::default(),
            output: OutputMode::InMemory,
            return_neighbors: false,
        }
    }

    /// Override search settings
    ///
    /// ```rust,ignore
    /// let config = GraphConfig::preset(Preset::Fast).search(|c| c.k(30).eps(0.2));
    /// ```
    pub fn search<F>(mut self, f: F) -> Self
    where
        F: FnOnce(SearchConfig) -> SearchConfig,
    {
        self.search = f(self.search);
        self
    }

    /// Override SNN settings
    pub fn snn<F>(mut self, f: F) -> Self
    where
        F: FnOnce(SnnConfig) -> SnnConfig,
    {
        self.snn = f(self.snn);
        self
    }

    /// Shorthand for `search(|c| c.k(k))`
    pub fn k(self, k: usize) -> Self {
        self.search(|c| c.k(k))
    }

    /// Shorthand for toggling SNN refinement
    pub fn snn_enabled(self, enabled: bool) -> Self {
        self.snn(|c| c.enabled(enabled))
    }

    /// Shorthand for setting the prune threshold
    pub fn prune_threshold(self, threshold: f64) -> Self {
        self.snn(|c| c.prune_threshold(threshold))
    }

    /// Set worker count (0 = auto)
    pub fn workers(mut self, num_workers: usize) -> Self {
        self.parallel = ParallelConfig::with_workers(num_workers);
        self
    }

    /// Select output mode
    pub fn output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    /// Keep neighbor lists in the output
    pub fn return_neighbors(mut self, enabled: bool) -> Self {
        self.return_neighbors = enabled;
        self
    }

    /// Validate and freeze the configuration
    pub fn build(self) -> ConfigResult<ValidatedConfig> {
        self.search.validate()?;
        self.snn.validate()?;
        self.parallel.validate()?;
        self.output.validate()?;
        Ok(ValidatedConfig(self))
    }

    /// Load from a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse from YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let raw: serde_yaml::Value = serde_yaml::from_str(content)?;
        if raw.get("version").is_none() {
            return Err(ConfigError::MissingVersion);
        }

        // Typed parse rejects unknown sections and wrongly typed fields
        let export: ConfigExportV1 = serde_yaml::from_value(raw.clone())?;
        if !SUPPORTED_VERSIONS.contains(&export.version) {
            return Err(ConfigError::UnsupportedVersion {
                found: export.version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset = Preset::from_str(&export.preset)
            .map_err(|_| ConfigError::UnknownPreset(export.preset.clone()))?;

        // Sections overlay the preset field by field
        let base = Self::preset(preset);
        Ok(Self {
            preset,
            search: overlay(&base.search, raw.get("search"))?,
            snn: overlay(&base.snn, raw.get("snn"))?,
            parallel: overlay(&base.parallel, raw.get("parallel"))?,
            output: export.output.unwrap_or(base.output),
            return_neighbors: export.return_neighbors.unwrap_or(base.return_neighbors),
        })
    }

    /// Export as YAML v1
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: 1,
            preset: self.preset.as_str().to_string(),
            search: Some(self.search.clone()),
            snn: Some(self.snn.clone()),
            parallel: Some(self.parallel.clone()),
            output: Some(self.output.clone()),
            return_neighbors: Some(self.return_neighbors),
        };
        Ok(serde_yaml::to_string(&export)?)
    }
}

/// Merge the keys of a YAML mapping onto `base`
fn overlay<T>(base: &T, section: Option<&Value>) -> ConfigResult<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    let overrides = match section {
        None | Some(Value::Null) => return Ok(base.clone()),
        Some(Value::Mapping(m)) => m,
        Some(other) => return Ok(serde_yaml::from_value(other.clone())?),
    };

    let mut merged = serde_yaml::to_value(base)?;
    if let Value::Mapping(target) = &mut merged {
        for (key, value) in overrides {
            target.insert(key.clone(), value.clone());
        }
    }
    Ok(serde_yaml::from_value(merged)?)
}

/// Configuration that passed `GraphConfig::build`
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig(GraphConfig);

impl ValidatedConfig {
    pub fn as_inner(&self) -> &GraphConfig {
        &self.0
    }

    pub fn into_inner(self) -> GraphConfig {
        self.0
    }
}

impl std::ops::Deref for ValidatedConfig {
    type Target = GraphConfig;

    fn deref(&self) -> &GraphConfig {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_builds() {
        let config = GraphConfig::default().build().unwrap();
        assert_eq!(config.search.k, 20);
        assert!(config.snn.enabled);
        assert_eq!(config.output, OutputMode::InMemory);
    }

    #[test]
    fn test_builder_overrides() {
        let config = GraphConfig::preset(Preset::Fast)
            .search(|c| c.k(30).eps(0.25))
            .prune_threshold(0.2)
            .workers(2);
        assert_eq!(config.search.k, 30);
        assert_eq!(config.search.eps, 0.25);
        assert_eq!(config.snn.prune_threshold, 0.2);
        assert_eq!(config.parallel.num_workers, 2);
    }

    #[test]
    fn test_build_rejects_bad_k() {
        assert!(GraphConfig::default().k(0).build().is_err());
    }

    #[test]
    fn test_build_rejects_unwritable_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = GraphConfig::default().output(OutputMode::file(dir.path().join("a/b.tsv")));
        let err = config.build().unwrap_err();
        assert!(matches!(err, ConfigError::OutputNotWritable { .. }));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = GraphConfig::preset(Preset::Fast).k(15).snn_enabled(false);
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("preset: fast"));

        let loaded = GraphConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_yaml_loading_from_file() {
        let yaml_content = r#"
version: 1
preset: exact
search:
  k: 12
  dims: [1, 2, 3]
snn:
  prune_threshold: 0.1
output:
  mode: file
  path: /tmp/graph.tsv
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let config = GraphConfig::from_yaml(temp_file.path()).unwrap();
        assert_eq!(config.preset, Preset::Exact);
        assert_eq!(config.search.method, SearchMethod::BruteForce);
        assert_eq!(config.search.k, 12);
        assert_eq!(config.search.dims, Some(vec![1, 2, 3]));
        assert!(config.snn.enabled);
        assert_eq!(config.snn.prune_threshold, 0.1);
        assert_eq!(config.output, OutputMode::file("/tmp/graph.tsv"));
    }

    #[test]
    fn test_partial_search_section_keeps_preset() {
        let exact = GraphConfig::from_yaml_str("version: 1\npreset: exact\nsearch:\n  k: 12\n").unwrap();
        assert_eq!(exact.search.method, SearchMethod::BruteForce);
        assert_eq!(exact.search.k, 12);

        let fast = GraphConfig::from_yaml_str("version: 1\npreset: fast\nsearch:\n  k: 30\n").unwrap();
        assert_eq!(fast.search.eps, Preset::Fast.eps());
        assert_eq!(fast.search.k, 30);
        assert_eq!(fast, GraphConfig::preset(Preset::Fast).k(30));
    }

    #[test]
    fn test_partial_section_overrides_preset_field() {
        let config =
            GraphConfig::from_yaml_str("version: 1\npreset: fast\nsearch:\n  eps: 0.1\n").unwrap();
        assert_eq!(config.search.eps, 0.1);
        assert_eq!(config.search.k, 20);
    }

    #[test]
    fn test_yaml_missing_version() {
        let err = GraphConfig::from_yaml_str("preset: fast\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingVersion));
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let err = GraphConfig::from_yaml_str("version: 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedVersion { found: 2, .. }));
    }

    #[test]
    fn test_yaml_unknown_preset() {
        let err = GraphConfig::from_yaml_str("version: 1\npreset: turbo\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPreset(ref p) if p == "turbo"));
    }

    #[test]
    fn test_yaml_non_boolean_flag_rejected() {
        let err =
            GraphConfig::from_yaml_str("version: 1\nsearch:\n  l2_norm: maybe\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_yaml_unknown_section_rejected() {
        let err = GraphConfig::from_yaml_str("version: 1\ncluster: {}\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }
}
