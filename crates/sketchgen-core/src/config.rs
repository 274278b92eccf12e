//! Generator configuration.
//!
//! [`GeneratorConfig`] holds every tunable of the pipeline. It is built either
//! through [`GeneratorConfigBuilder`] or read from a TOML file:
//!
//! ```toml
//! [generator]
//! row_threshold = 0.05
//! row_strategy = "row_anchor"
//! row_gap = 8
//! trailing_spacer = false
//! ```
//!
//! Missing keys keep their defaults.

use crate::error::{Result, SketchError};
use crate::geometry::ReferenceCanvas;
use crate::layout::{LayoutBuilder, DEFAULT_ROW_GAP};
use crate::page::{DEFAULT_PAGE_NAME, DEFAULT_PAGE_PADDING, DEFAULT_PREVIEW_LIMIT};
use crate::reading_order::{ReadingOrderConfig, RowStrategy, DEFAULT_ROW_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Reference canvas width in logical pixels (default: 375)
    pub reference_width: f32,
    /// Reference canvas height in logical pixels (default: 812)
    pub reference_height: f32,
    /// Maximum normalized vertical distance for two detections to share a row
    /// (default: 0.08, exclusive)
    pub row_threshold: f32,
    /// What a candidate's y is compared against when grouping rows
    pub row_strategy: RowStrategy,
    /// Spacer height between rows (default: 16)
    pub row_gap: u32,
    /// Emit a spacer after the last row too (default: true)
    pub trailing_spacer: bool,
    /// Widgets included in a preview (default: 5)
    pub preview_limit: usize,
    /// Padding around the page body (default: 16)
    pub page_padding: u32,
    /// Page name used when the caller supplies none
    pub default_page_name: String,
}

impl Default for GeneratorConfig {
    #[inline]
    fn default() -> Self {
        Self {
            reference_width: ReferenceCanvas::PHONE.width,
            reference_height: ReferenceCanvas::PHONE.height,
            row_threshold: DEFAULT_ROW_THRESHOLD,
            row_strategy: RowStrategy::default(),
            row_gap: DEFAULT_ROW_GAP,
            trailing_spacer: true,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
            page_padding: DEFAULT_PAGE_PADDING,
            default_page_name: DEFAULT_PAGE_NAME.to_string(),
        }
    }
}

/// On-disk layout: settings live under a `[generator]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    generator: GeneratorConfig,
}

impl GeneratorConfig {
    /// Canvas widget sizes are projected onto
    #[inline]
    #[must_use]
    pub const fn canvas(&self) -> ReferenceCanvas {
        ReferenceCanvas::new(self.reference_width, self.reference_height)
    }

    /// Row grouping settings
    #[inline]
    #[must_use]
    pub const fn reading_order(&self) -> ReadingOrderConfig {
        ReadingOrderConfig {
            row_threshold: self.row_threshold,
            strategy: self.row_strategy,
        }
    }

    /// Tree builder for these settings
    #[inline]
    #[must_use]
    pub const fn layout(&self) -> LayoutBuilder {
        LayoutBuilder::new(self.row_gap, self.trailing_spacer)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::Config`] for a non-positive or non-finite canvas,
    /// a row threshold outside `(0, 1]`, or a zero preview limit.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("reference_width", self.reference_width),
            ("reference_height", self.reference_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SketchError::Config(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }

        if !self.row_threshold.is_finite() || self.row_threshold <= 0.0 || self.row_threshold > 1.0
        {
            return Err(SketchError::Config(format!(
                "row_threshold must be in (0, 1], got {}",
                self.row_threshold
            )));
        }

        if self.preview_limit == 0 {
            return Err(SketchError::Config(
                "preview_limit must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Parse and validate a TOML document with a `[generator]` table.
    ///
    /// # Errors
    ///
    /// [`SketchError::ConfigFile`] on malformed TOML, [`SketchError::Config`]
    /// when a value is out of range.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        file.generator.validate()?;
        Ok(file.generator)
    }

    /// Read a TOML config file.
    ///
    /// # Errors
    ///
    /// [`SketchError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("Loaded generator config from {}", path.display());
        Ok(config)
    }
}

/// Builder for [`GeneratorConfig`].
///
/// # Examples
///
/// ```rust
/// use sketchgen_core::{GeneratorConfigBuilder, RowStrategy};
///
/// # fn main() -> sketchgen_core::Result<()> {
/// let config = GeneratorConfigBuilder::strict_rows()
///     .row_threshold(0.05)
///     .build()?;
/// assert_eq!(config.row_strategy, RowStrategy::RowAnchor);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    /// Builder with default settings
    #[inline]
    #[must_use = "returns a new builder with default settings"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing settings, e.g. a loaded config file
    #[inline]
    #[must_use]
    pub fn from_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Rows anchored at their top edge instead of drifting with each member.
    ///
    /// Diagonal runs of elements split into separate rows.
    #[must_use = "returns a builder with row-anchored grouping"]
    pub fn strict_rows() -> Self {
        Self::new().row_strategy(RowStrategy::RowAnchor)
    }

    /// Tighter spacing: 8px gaps and no spacer after the last row
    #[must_use = "returns a builder with compact spacing"]
    pub fn compact() -> Self {
        Self::new().row_gap(8).trailing_spacer(false)
    }

    #[inline]
    #[must_use = "returns the modified builder"]
    pub fn reference_canvas(mut self, width: f32, height: f32) -> Self {
        self.config.reference_width = width;
        self.config.reference_height = height;
        self
    }

    #[inline]
    #[must_use = "returns the modified builder"]
    pub fn row_threshold(mut self, threshold: f32) -> Self {
        self.config.row_threshold = threshold;
        self
    }

    #[inline]
    #[must_use = "returns the modified builder"]
    pub fn row_strategy(mut self, strategy: RowStrategy) -> Self {
        self.config.row_strategy = strategy;
        self
    }

    #[inline]
    #[must_use = "returns the modified builder"]
    pub fn row_gap(mut self, gap: u32) -> Self {
        self.config.row_gap = gap;
        self
    }

    #[inline]
    #[must_use = "returns the modified builder"]
    pub fn trailing_spacer(mut self, enabled: bool) -> Self {
        self.config.trailing_spacer = enabled;
        self
    }

    #[inline]
    #[must_use = "returns the modified builder"]
    pub fn preview_limit(mut self, limit: usize) -> Self {
        self.config.preview_limit = limit;
        self
    }

    #[inline]
    #[must_use = "returns the modified builder"]
    pub fn page_padding(mut self, padding: u32) -> Self {
        self.config.page_padding = padding;
        self
    }

    #[inline]
    #[must_use = "returns the modified builder"]
    pub fn default_page_name(mut self, name: impl Into<String>) -> Self {
        self.config.default_page_name = name.into();
        self
    }

    /// Validate and return the config.
    ///
    /// # Errors
    ///
    /// See [`GeneratorConfig::validate`].
    pub fn build(self) -> Result<GeneratorConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
