//! Configuration conversion utilities for CLI arguments

use crate::cli::main_impl::Cli;
use crate::config::TransparencyConfig;
use anyhow::{Context, Result};

/// Convert CLI arguments to a `TransparencyConfig`
pub(crate) struct CliConfigBuilder;

impl CliConfigBuilder {
    /// Build `TransparencyConfig` from CLI arguments
    pub(crate) fn from_cli(cli: &Cli) -> Result<TransparencyConfig> {
        let config = TransparencyConfig::builder()
            .round_trip(cli.round_trip)
            .output_dir(cli.output_dir.clone())
            .build()
            .context("Invalid configuration")?;

        Ok(config)
    }

    /// Validate CLI arguments for consistency
    pub(crate) fn validate_cli(cli: &Cli) -> Result<()> {
        if cli.input.as_os_str().is_empty() {
            anyhow::bail!("Input path must not be empty");
        }

        Ok(())
    }
}
