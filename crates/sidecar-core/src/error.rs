//! Error types for Side-Car core
//!
//! Validation defects are data, not errors; see
//! [`sidecar_validation::ValidationResult`]. This module covers failures
//! around them:
//! - Reading documents from files and streams
//! - Loading configuration
//! - Converting bundled or validated documents into the typed tree
//! - Selecting entities that do not exist

use sidecar_model::ModelError;
use std::path::PathBuf;

/// Main Side-Car error type
#[derive(Debug, thiserror::Error)]
pub enum SidecarError {
    /// IO error reading a document or config file
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error on a line stream
    #[error("stream error: {0}")]
    Stream(#[source] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Contract model error
    #[error("contract error: {0}")]
    Contract(#[from] ModelError),

    /// Selection refers to a missing project or roadmap
    #[error("{kind} not found: '{id}'")]
    NotFound { kind: &'static str, id: String },
}

impl SidecarError {
    /// Create IO error for path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { kind, id: id.into() }
    }
}
