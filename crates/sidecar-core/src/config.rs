//! Dashboard configuration
//!
//! Loaded from TOML; every field has a default, so an empty file is a
//! valid configuration.

use crate::error::SidecarError;
use serde::{Deserialize, Serialize};
use sidecar_progress::UP_NEXT_TITLE_LIMIT;
use std::path::Path;
use std::time::Duration;

/// Side-Car configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidecarConfig {
    /// Client view: up-next only considers deliverables
    pub client_view: bool,
    /// Character limit for the up-next title
    pub up_next_title_limit: usize,
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Live update settings
    pub feed: FeedConfig,
}

impl SidecarConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With client view
    #[inline]
    #[must_use]
    pub fn with_client_view(mut self, client_view: bool) -> Self {
        self.client_view = client_view;
        self
    }

    /// With up-next title limit
    #[inline]
    #[must_use]
    pub fn with_title_limit(mut self, limit: usize) -> Self {
        self.up_next_title_limit = limit;
        self
    }

    /// With polling interval
    #[inline]
    #[must_use]
    pub fn with_poll_interval_ms(mut self, interval_ms: u64) -> Self {
        self.feed.poll_interval_ms = interval_ms;
        self
    }

    /// Parse and check a TOML document
    ///
    /// # Errors
    /// Returns [`SidecarError::Config`] on malformed TOML or zero limits.
    pub fn from_toml_str(text: &str) -> Result<Self, SidecarError> {
        let config: Self = toml::from_str(text).map_err(|e| SidecarError::Config(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns [`SidecarError::Io`] if the file cannot be read, otherwise as
    /// [`SidecarConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SidecarError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| SidecarError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Reject values that would stall the feed or hide every title
    ///
    /// # Errors
    /// Returns [`SidecarError::Config`] naming the offending field.
    pub fn check(&self) -> Result<(), SidecarError> {
        if self.up_next_title_limit == 0 {
            return Err(SidecarError::Config(
                "up_next_title_limit must be greater than 0".to_string(),
            ));
        }
        if self.feed.poll_interval_ms == 0 {
            return Err(SidecarError::Config(
                "feed.poll_interval_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SidecarConfig {
    fn default() -> Self {
        Self {
            client_view: false,
            up_next_title_limit: UP_NEXT_TITLE_LIMIT,
            log_filter: "info".to_string(),
            feed: FeedConfig::default(),
        }
    }
}

/// Live update settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Delay between file polls
    pub poll_interval_ms: u64,
}

impl FeedConfig {
    #[inline]
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 5000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(SidecarConfig::from_toml_str("").unwrap(), SidecarConfig::default());
    }

    #[test]
    fn partial_toml_overrides_fields() {
        let config = SidecarConfig::from_toml_str(
            r#"
            client_view = true

            [feed]
            poll_interval_ms = 250
            "#,
        )
        .unwrap();
        assert!(config.client_view);
        assert_eq!(config.up_next_title_limit, 60);
        assert_eq!(config.feed.poll_interval(), Duration::from_millis(250));
    }

    #[test]
    fn zero_limits_are_rejected() {
        let err = SidecarConfig::from_toml_str("up_next_title_limit = 0").unwrap_err();
        assert!(err.to_string().contains("up_next_title_limit"));

        let err = SidecarConfig::from_toml_str("[feed]\npoll_interval_ms = 0").unwrap_err();
        assert!(err.to_string().contains("poll_interval_ms"));
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = SidecarConfig::from_toml_str("client_view = \"yes\"").unwrap_err();
        assert!(matches!(err, SidecarError::Config(_)));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_filter = \"debug\"").unwrap();
        let config = SidecarConfig::load(file.path()).unwrap();
        assert_eq!(config.log_filter, "debug");

        let missing = SidecarConfig::load("/nonexistent/sidecar.toml");
        assert!(matches!(missing, Err(SidecarError::Io { .. })));
    }

    #[test]
    fn builders_chain() {
        let config = SidecarConfig::new()
            .with_client_view(true)
            .with_title_limit(20)
            .with_poll_interval_ms(100);
        assert!(config.client_view);
        assert_eq!(config.up_next_title_limit, 20);
        assert!(config.check().is_ok());
    }
}
