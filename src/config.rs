//! Configuration types for background transparency operations

use crate::{color::TolerancePolicy, error::TransparencyError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for background transparency operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransparencyConfig {
    /// Color matching tolerances
    pub tolerance: TolerancePolicy,

    /// Pipe the decoded image through a base64 data URI before the transform
    pub round_trip: bool,

    /// Directory receiving `out__<stem>.png` files
    pub output_dir: PathBuf,
}

impl Default for TransparencyConfig {
    fn default() -> Self {
        Self {
            tolerance: TolerancePolicy::default(),
            round_trip: false,
            output_dir: PathBuf::from("."),
        }
    }
}

impl TransparencyConfig {
    /// Create a new configuration builder
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bg_transparent::{TolerancePolicy, TransparencyConfig};
    ///
    /// let config = TransparencyConfig::builder()
    ///     .tolerance(TolerancePolicy::new(80, 60).unwrap())
    ///     .round_trip(true)
    ///     .output_dir("results")
    ///     .build()
    ///     .unwrap();
    /// assert!(config.round_trip);
    /// ```
    #[must_use]
    pub fn builder() -> TransparencyConfigBuilder {
        TransparencyConfigBuilder::default()
    }

    /// Validate all configuration parameters
    ///
    /// # Errors
    /// - Uniform tolerance greater than the general tolerance
    /// - Output directory that is an existing regular file
    pub fn validate(&self) -> crate::Result<()> {
        self.tolerance.validate()?;

        if self.output_dir.is_file() {
            return Err(TransparencyError::invalid_config(format!(
                "output directory '{}' is an existing file",
                self.output_dir.display()
            )));
        }

        Ok(())
    }
}

/// Builder for `TransparencyConfig`
#[derive(Debug, Default)]
pub struct TransparencyConfigBuilder {
    config: TransparencyConfig,
}

impl TransparencyConfigBuilder {
    /// Set the color matching tolerances
    #[must_use]
    pub fn tolerance(mut self, tolerance: TolerancePolicy) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Enable or disable the data URI round-trip
    #[must_use]
    pub fn round_trip(mut self, enabled: bool) -> Self {
        self.config.round_trip = enabled;
        self
    }

    /// Set the output directory
    #[must_use]
    pub fn output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    /// - Invalid tolerance policy
    pub fn build(self) -> crate::Result<TransparencyConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
