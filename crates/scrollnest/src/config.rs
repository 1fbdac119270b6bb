//! Switches and tuning for [`ScrollEx`](crate::ScrollEx)
//!
//! Every field has a default, so a config document only needs the keys it
//! changes:
//!
//! ```toml
//! enable_load_more = true
//!
//! [pagination]
//! threshold = 0.85
//! load_timeout = 10.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default time between pagination evaluations
pub const DEFAULT_DEBOUNCE_INTERVAL: f32 = 0.2;
/// Default normalized position past which more items are requested
pub const DEFAULT_LOAD_THRESHOLD: f32 = 0.9;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrollExConfig {
    /// Arbitrate drags between the view and its ancestor
    pub enable_sliding_conflict: bool,
    /// Poll the scroll position and request more items near the end
    pub enable_load_more: bool,
    pub pagination: PaginationConfig,
}

impl Default for ScrollExConfig {
    fn default() -> Self {
        Self {
            enable_sliding_conflict: true,
            enable_load_more: false,
            pagination: PaginationConfig::default(),
        }
    }
}

impl ScrollExConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ScrollExConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.pagination.validate()
    }
}

/// Load-more polling parameters
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Seconds accumulated between evaluations
    pub debounce_interval: f32,
    /// Normalized position (exclusive) that triggers a load
    pub threshold: f32,
    /// Abandon a load that has not completed after this many seconds.
    /// `None` waits forever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_timeout: Option<f32>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            debounce_interval: DEFAULT_DEBOUNCE_INTERVAL,
            threshold: DEFAULT_LOAD_THRESHOLD,
            load_timeout: None,
        }
    }
}

impl PaginationConfig {
    pub fn with_load_timeout(mut self, seconds: f32) -> Self {
        self.load_timeout = Some(seconds);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.debounce_interval.is_finite() && self.debounce_interval > 0.0) {
            return Err(ConfigError::Invalid {
                field: "pagination.debounce_interval",
                reason: format!("must be a positive number, got {}", self.debounce_interval),
            });
        }

        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::Invalid {
                field: "pagination.threshold",
                reason: format!("must be within [0, 1], got {}", self.threshold),
            });
        }

        if let Some(timeout) = self.load_timeout {
            if !(timeout.is_finite() && timeout > 0.0) {
                return Err(ConfigError::Invalid {
                    field: "pagination.load_timeout",
                    reason: format!("must be a positive number, got {timeout}"),
                });
            }
        }

        Ok(())
    }
}
