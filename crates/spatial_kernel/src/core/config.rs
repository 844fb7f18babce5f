//! # Kernel Configuration
//!
//! [`KernelConfig`] gathers the values an embedding application chooses once
//! at startup: the comparison tolerance, spatial tree limits and the default
//! log filter. It loads from TOML or RON through the [`Config`] trait.
//!
//! ```toml
//! log_level = "info"
//!
//! [tolerance]
//! epsilon = 1e-9
//!
//! [tree]
//! max_depth = 8
//! ```

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError, Format};
use crate::collision::Collision;
use crate::foundation::Tolerance;
pub use crate::spatial::TreeConfig;

/// Top-level kernel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
    /// Absolute tolerance for approximate comparisons
    pub tolerance: Tolerance,
    /// Spatial tree limits
    pub tree: TreeConfig,
}

impl KernelConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the comparison tolerance
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the spatial tree limits
    pub fn with_tree(mut self, tree: TreeConfig) -> Self {
        self.tree = tree;
        self
    }

    /// Set the default log filter
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Collision context using the configured tolerance
    pub const fn collision(&self) -> Collision {
        Collision::new(self.tolerance)
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            tolerance: Tolerance::default(),
            tree: TreeConfig::default(),
        }
    }
}

impl Config for KernelConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log level cannot be empty".to_string()));
        }
        Ok(())
    }
}
