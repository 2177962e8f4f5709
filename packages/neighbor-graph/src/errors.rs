//! Error types for neighbor-graph
//!
//! Every fatal condition aborts the whole pipeline; there is no partial graph.

use crate::config::ConfigError;
use thiserror::Error;

/// Main error type for graph construction
#[derive(Debug, Error)]
pub enum GraphError {
    /// Invalid configuration, raised before any computation starts
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Upstream dimensionality reduction has not produced an embedding
    #[error("Prerequisite not met: {0}")]
    Prerequisite(String),

    /// Neighbor search could not produce a result
    #[error("Neighbor search failed: {0}")]
    SearchFailure(String),

    /// IO error while writing or reading an edge file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Worker pool could not be created
    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    /// Malformed edge file or embedding text
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl GraphError {
    /// Create a prerequisite error
    pub fn prerequisite(msg: impl Into<String>) -> Self {
        GraphError::Prerequisite(msg.into())
    }

    /// Create a search failure
    pub fn search(msg: impl Into<String>) -> Self {
        GraphError::SearchFailure(msg.into())
    }

    /// Create a parse error for a 1-indexed line
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        GraphError::Parse {
            line,
            message: msg.into(),
        }
    }

    /// True for errors raised before computation started
    pub fn is_configuration(&self) -> bool {
        matches!(self, GraphError::Configuration(_))
    }
}

impl From<csv::Error> for GraphError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map_or(0, |p| p.line() as usize);
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(e) => GraphError::Io(e),
            _ => GraphError::parse(line, message),
        }
    }
}

/// Result type alias for graph operations
pub type Result<T> = std::result::Result<T, GraphError>;
