//! Error types for the lazyrow crate.
//!
//! The taxonomy mirrors the failure model of the windowed manager:
//!
//! - [`LayoutError`] - invalid list geometry. Fatal at construction time:
//!   a `ListLayout` that cannot be built never reaches the manager, so
//!   windowing math never has to defend against nonsense dimensions.
//! - [`AppError`] - top-level umbrella for the demo binary, wrapping
//!   configuration, logging and terminal failures.
//!
//! Note what is *not* here: load failures. A failed load is an expected
//! outcome ([`LoadOutcome::Failure`](super::types::LoadOutcome)), recovered
//! via the bounded retry policy, never an `Err`. Stale completions are
//! likewise discarded silently (debug-level log at most) - there is no
//! fatal runtime error in steady-state operation.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid list geometry, rejected when constructing a `ListLayout`.
///
/// Every variant is a configuration bug, not a runtime condition: the
/// manager is constructed once with a validated layout and the windowing
/// math can then assume positive row heights and at least one column.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    /// Item height must be strictly positive (rows would otherwise
    /// collapse and the visible-row division would be meaningless).
    #[error("item height must be > 0 (got {0})")]
    NonPositiveItemHeight(f64),

    /// Padding between rows must be >= 0.
    #[error("padding must be >= 0 (got {0})")]
    NegativePadding(f64),

    /// A grid needs at least one column for the row->index mapping.
    #[error("column count must be >= 1")]
    ZeroColumns,

    /// A dimension was NaN or infinite.
    #[error("{name} must be finite (got {value})")]
    NonFiniteDimension {
        /// Which dimension was rejected.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
}

/// Top-level error for the demo binary.
///
/// Library users never see this type; the manager itself is infallible
/// after construction. The binary composes config loading, logging setup
/// and terminal I/O, and any of those can fail fatally.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid gallery geometry from config or CLI.
    #[error("Invalid layout: {0}")]
    Layout(#[from] LayoutError),

    /// Failed to load or parse the configuration file.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Failed to initialize the tracing subscriber.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal setup, rendering or event-read failure.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// A path from config could not be used.
    #[error("Invalid path: {0:?}")]
    InvalidPath(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_error_messages_name_the_offender() {
        let err = LayoutError::NonPositiveItemHeight(0.0);
        assert!(err.to_string().contains("item height"));

        let err = LayoutError::NegativePadding(-2.0);
        assert!(err.to_string().contains("-2"));

        let err = LayoutError::NonFiniteDimension {
            name: "viewport height",
            value: f64::NAN,
        };
        assert!(err.to_string().contains("viewport height"));
    }

    #[test]
    fn layout_error_converts_to_app_error() {
        fn build() -> Result<(), AppError> {
            Err(LayoutError::ZeroColumns)?
        }
        let err = build().unwrap_err();
        assert!(matches!(err, AppError::Layout(LayoutError::ZeroColumns)));
    }

    #[test]
    fn io_error_converts_to_app_error() {
        fn run() -> Result<(), AppError> {
            Err(std::io::Error::other("boom"))?
        }
        assert!(matches!(run().unwrap_err(), AppError::Terminal(_)));
    }
}
