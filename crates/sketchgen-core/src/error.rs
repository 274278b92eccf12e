//! Error types for sketchgen.
//!
//! Code generation itself is total and never fails: every detection set,
//! however degenerate, produces a complete page. Errors only arise at the
//! edges of the library, when configuration is validated or when detection
//! and configuration files are read and parsed.
//!
//! # Examples
//!
//! ```rust
//! use sketchgen_core::{GeneratorConfigBuilder, SketchError};
//!
//! let err = GeneratorConfigBuilder::new()
//!     .row_threshold(-1.0)
//!     .build()
//!     .unwrap_err();
//! assert!(err.is_config_error());
//! ```

use thiserror::Error;

/// Error types that can occur while loading input or configuration.
#[derive(Error, Debug)]
pub enum SketchError {
    /// Invalid generator or ingest configuration.
    ///
    /// Raised by [`GeneratorConfigBuilder::build`](crate::GeneratorConfigBuilder::build)
    /// when a value is out of range (non-positive canvas, non-finite threshold, ...).
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Detection input could not be parsed as JSON.
    #[error("Failed to parse detections: {0}")]
    Parse(#[from] serde_json::Error),

    /// Detection input is valid JSON but not in an accepted shape.
    #[error("Invalid detection input: {0}")]
    Input(String),

    /// A TOML configuration file could not be parsed.
    #[error("Failed to parse config file: {0}")]
    ConfigFile(#[from] toml::de::Error),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SketchError {
    /// Returns true if this error is a configuration error (user-fixable).
    #[inline]
    #[must_use = "this method returns a boolean, not modifying the error"]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_) | Self::ConfigFile(_))
    }

    /// Returns true if this is an I/O error.
    #[inline]
    #[must_use = "this method returns a boolean, not modifying the error"]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    /// Returns true if the detection input was malformed.
    #[inline]
    #[must_use = "this method returns a boolean, not modifying the error"]
    pub const fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::Input(_))
    }
}

/// Result type alias for sketchgen operations.
pub type Result<T> = std::result::Result<T, SketchError>;
