//! Validation defects and results

use serde::{Deserialize, Serialize};
use sidecar_model::FieldPath;
use std::fmt;

/// Message used when the input text is not JSON at all
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON";

/// A single defect, located by a dotted/bracketed path
///
/// Root-level defects carry an empty path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    /// Create issue at `path`
    #[must_use]
    pub fn new(path: &FieldPath, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "root" } else { &self.path };
        write!(f, "{path}: {}", self.message)
    }
}

/// Outcome of validating one payload
///
/// Errors block rendering; warnings never do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Result holding a single error
    #[must_use]
    pub fn from_error(path: &FieldPath, message: impl Into<String>) -> Self {
        Self {
            errors: vec![ValidationIssue::new(path, message)],
            warnings: Vec::new(),
        }
    }

    /// Synthetic result for unparseable input
    #[must_use]
    pub fn invalid_json() -> Self {
        Self::from_error(&FieldPath::root(), INVALID_JSON_MESSAGE)
    }

    /// Zero errors, regardless of warnings
    #[inline]
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        self.errors.is_empty()
    }

    /// Any advisory warnings present
    #[inline]
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// No errors and no warnings
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Concatenate another subtree's defects after this one's
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self
    }

    pub(crate) fn push_error(&mut self, path: &FieldPath, message: impl Into<String>) {
        self.errors.push(ValidationIssue::new(path, message));
    }

    pub(crate) fn push_warning(&mut self, path: &FieldPath, message: impl Into<String>) {
        self.warnings.push(ValidationIssue::new(path, message));
    }

    /// Errors located exactly at `path`
    pub fn errors_at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ValidationIssue> + 'a {
        self.errors.iter().filter(move |e| e.path == path)
    }
}
