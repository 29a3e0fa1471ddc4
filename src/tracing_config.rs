//! Tracing configuration module for structured logging
//!
//! Applications configure the subscriber; library code only emits events
//! through `log` and `tracing`. All output goes to stderr so stdout stays
//! free for piping.
//!
//! The span and event helpers are always available. `TracingConfig` needs
//! the `cli` feature.

#[cfg(feature = "cli")]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

#[cfg(feature = "cli")]
/// Configuration for tracing output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable console output, colored when stderr is a terminal (default for CLI)
    Console,
    /// Compact console output without colors for CI environments
    Compact,
    /// JSON structured logging
    #[cfg(feature = "tracing-json")]
    Json,
}

#[cfg(feature = "cli")]
/// Tracing configuration builder
#[derive(Debug)]
pub struct TracingConfig {
    /// Verbosity level (maps to log levels)
    pub verbosity: u8,
    /// Output format
    pub format: TracingFormat,
    /// Environment filter string (overrides verbosity if set)
    pub env_filter: Option<String>,
}

#[cfg(feature = "cli")]
impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            format: TracingFormat::Console,
            env_filter: None,
        }
    }
}

#[cfg(feature = "cli")]
impl TracingConfig {
    /// Create a new tracing configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity level (0-2+)
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set output format
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Set custom environment filter
    pub fn with_env_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Convert verbosity level to tracing filter string
    pub fn verbosity_to_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "info",  // Default: one line per processed file
            1 => "debug", // -v: stage timings and pixel counts
            _ => "trace", // -vv+: everything
        }
    }

    /// Build the filter: explicit filter, then `RUST_LOG`, then verbosity
    fn build_filter(&self) -> anyhow::Result<EnvFilter> {
        if let Some(env_filter) = &self.env_filter {
            return Ok(EnvFilter::try_new(env_filter)?);
        }
        if self.verbosity == 0 {
            if let Ok(filter) = EnvFilter::try_from_default_env() {
                return Ok(filter);
            }
        }
        Ok(EnvFilter::try_new(self.verbosity_to_filter())?)
    }

    /// Initialize tracing subscriber based on configuration
    pub fn init(self) -> anyhow::Result<()> {
        use std::io::IsTerminal;
        use tracing_subscriber::fmt;

        let registry = Registry::default().with(self.build_filter()?);

        match self.format {
            TracingFormat::Console => {
                let fmt_layer = fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_target(false)
                    .with_level(true)
                    .compact();

                registry.with(fmt_layer).try_init()?;
            },

            TracingFormat::Compact => {
                let fmt_layer = fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_target(false)
                    .compact();

                registry.with(fmt_layer).try_init()?;
            },

            #[cfg(feature = "tracing-json")]
            TracingFormat::Json => {
                let fmt_layer = fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(true)
                    .with_span_list(true);

                registry.with(fmt_layer).try_init()?;
            },
        }

        Ok(())
    }
}

/// Span creation helpers for common operations
pub mod spans {
    use tracing::{Level, Span};

    /// Create a span for file processing operations
    pub fn file_processing(file_path: &std::path::Path, round_trip: bool) -> Span {
        tracing::span!(
            Level::INFO,
            "file_processing",
            file_path = %file_path.display(),
            round_trip = %round_trip
        )
    }

    /// Create a span for the transparency pass
    pub fn transform(width: u32, height: u32) -> Span {
        tracing::span!(Level::DEBUG, "transform", width = width, height = height)
    }

    /// Create a span for the data URI round-trip
    pub fn round_trip(format: &str) -> Span {
        tracing::span!(Level::DEBUG, "round_trip", format = %format)
    }
}

/// Event helpers for common logging patterns
pub mod events {
    use tracing::debug;

    /// Record a failure with context in the structured log
    ///
    /// Emitted at debug level; the user-facing diagnostic line is printed
    /// by the binary.
    pub fn error_with_context(error: &dyn std::fmt::Display, context: &str) {
        debug!(
            error = %error,
            context = %context,
            "Operation failed"
        );
    }

    /// Log the duration of a pipeline stage
    pub fn stage_timing(stage: &str, duration_ms: u64) {
        debug!(
            stage = %stage,
            duration_ms = %duration_ms,
            "Stage completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "cli")]
    #[test]
    fn test_verbosity_mapping() {
        assert_eq!(TracingConfig::new().with_verbosity(0).verbosity_to_filter(), "info");
        assert_eq!(TracingConfig::new().with_verbosity(1).verbosity_to_filter(), "debug");
        assert_eq!(TracingConfig::new().with_verbosity(2).verbosity_to_filter(), "trace");
        assert_eq!(TracingConfig::new().with_verbosity(10).verbosity_to_filter(), "trace");
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_config_builder() {
        let config = TracingConfig::new()
            .with_verbosity(2)
            .with_format(TracingFormat::Compact)
            .with_env_filter("bg_transparent=trace");

        assert_eq!(config.verbosity, 2);
        assert_eq!(config.format, TracingFormat::Compact);
        assert_eq!(config.env_filter.as_deref(), Some("bg_transparent=trace"));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_default_config() {
        let config = TracingConfig::default();
        assert_eq!(config.verbosity, 0);
        assert_eq!(config.format, TracingFormat::Console);
        assert!(config.env_filter.is_none());
    }

    #[test]
    fn test_span_helpers() {
        let _file = spans::file_processing(std::path::Path::new("red.jpg"), true);
        let _transform = spans::transform(2, 2);
        let _round_trip = spans::round_trip("png");
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_invalid_env_filter_rejected() {
        let config = TracingConfig::new().with_env_filter("[[[not a filter");
        assert!(config.build_filter().is_err());
    }
}
