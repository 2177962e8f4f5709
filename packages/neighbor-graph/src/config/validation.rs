//! Configuration validation
//!
//! Provides the `Validatable` trait plus the filesystem checks that must pass
//! before the pipeline touches any data.

use super::error::{ConfigError, ConfigResult};
use std::path::Path;

/// Trait for validatable configuration objects
///
/// # Example
/// ```rust,ignore
/// use neighbor_graph::config::validation::Validatable;
///
/// fn prepare<C: Validatable>(config: C) -> Result<C, ConfigError> {
///     config.validate()?;
///     Ok(config)
/// }
/// ```
pub trait Validatable {
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Get the configuration name for error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

impl<T: Validatable> Validatable for Option<T> {
    fn validate(&self) -> ConfigResult<()> {
        match self {
            Some(config) => config.validate(),
            None => Ok(()),
        }
    }
}

/// Check that `path` can receive an edge file.
///
/// The parent directory must already exist (directory creation belongs to the
/// caller). An existing target must be a regular, non read-only file. A probe
/// file is created and removed in the parent directory to catch permission
/// problems that metadata alone does not show.
pub fn ensure_writable(path: &Path) -> ConfigResult<()> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::not_writable(path, "empty path"));
    }

    if let Ok(meta) = std::fs::metadata(path) {
        if meta.is_dir() {
            return Err(ConfigError::not_writable(path, "target is a directory"));
        }
        if meta.permissions().readonly() {
            return Err(ConfigError::not_writable(path, "target is read-only"));
        }
    }

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    match std::fs::metadata(parent) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(ConfigError::not_writable(
                path,
                format!("parent {:?} is not a directory", parent),
            ))
        }
        Err(e) => {
            return Err(ConfigError::not_writable(
                path,
                format!("parent {:?} is not accessible: {}", parent, e),
            ))
        }
    }

    tempfile::NamedTempFile::new_in(parent)
        .map(drop)
        .map_err(|e| ConfigError::not_writable(path, format!("cannot create files: {}", e)))
}
