//! High-level code generator.
//!
//! [`CodeGenerator`] chains the pipeline stages: reading order, row
//! segmentation, layout tree, widget synthesis and page assembly.
//!
//! # Examples
//!
//! ```rust
//! use sketchgen_core::{CodeGenerator, Detection, ElementKind, NormalizedRect};
//!
//! let generator = CodeGenerator::default();
//! let detections = vec![
//!     Detection::new(ElementKind::Button, NormalizedRect::new(0.1, 0.1, 0.3, 0.05))
//!         .with_label("Go"),
//!     Detection::new(ElementKind::Text, NormalizedRect::new(0.5, 0.1, 0.3, 0.05))
//!         .with_label("Hello"),
//! ];
//!
//! let code = generator.generate(&detections, "HomePage");
//! assert!(code.source.contains("class HomePage extends StatefulWidget"));
//! assert_eq!(code.row_count, 1);
//! assert_eq!(code.widget_count, 2);
//! ```

use crate::config::GeneratorConfig;
use crate::detection::Detection;
use crate::layout::LayoutNode;
use crate::page;
use crate::reading_order::ReadingOrder;
use crate::synth::Synthesizer;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// A generated page and some figures about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    /// Dart class name actually used
    pub page_name: String,
    /// Complete Dart source file
    pub source: String,
    /// Lines in `source`, counted as `\n`-separated segments
    pub line_count: usize,
    /// Detections that produced a widget
    pub widget_count: usize,
    /// Rows found by the segmenter
    pub row_count: usize,
}

/// Detection-to-Flutter code generator.
///
/// Holds only its configuration; `generate` is pure and the generator can be
/// shared across threads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeGenerator {
    config: GeneratorConfig,
}

impl CodeGenerator {
    /// Create a generator.
    ///
    /// The config is used as given; validate it with
    /// [`GeneratorConfigBuilder::build`](crate::GeneratorConfigBuilder::build)
    /// or [`GeneratorConfig::validate`] first.
    #[inline]
    #[must_use = "returns a new CodeGenerator"]
    pub const fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn reading_order(&self) -> ReadingOrder {
        ReadingOrder::new(self.config.reading_order())
    }

    fn synthesizer(&self) -> Synthesizer {
        Synthesizer::new(self.config.canvas())
    }

    /// Detections in reading order
    #[must_use]
    pub fn sort(&self, detections: &[Detection]) -> Vec<Detection> {
        self.reading_order().sort(detections)
    }

    /// Build the layout tree without rendering it.
    #[must_use = "returns the layout tree"]
    pub fn layout(&self, detections: &[Detection]) -> LayoutNode {
        self.layout_with_rows(detections).0
    }

    fn layout_with_rows(&self, detections: &[Detection]) -> (LayoutNode, usize) {
        let order = self.reading_order();
        let rows = order.rows(detections);
        let row_count = rows.len();
        debug!(
            "Segmented {} detections into {row_count} rows",
            detections.len()
        );
        (self.config.layout().build(rows), row_count)
    }

    /// Generate a complete Dart page.
    ///
    /// A blank `page_name` falls back to the configured default name. Never
    /// fails: empty input yields a page with an empty column.
    #[must_use = "returns the generated code"]
    pub fn generate(&self, detections: &[Detection], page_name: &str) -> GeneratedCode {
        let requested = if page_name.trim().is_empty() {
            self.config.default_page_name.as_str()
        } else {
            page_name
        };
        let page_name = page::sanitize_identifier(requested);

        let (tree, row_count) = self.layout_with_rows(detections);
        let widget_count = tree
            .leaves()
            .iter()
            .filter(|detection| detection.kind.is_rendered())
            .count();

        let body = self.synthesizer().synthesize(&tree);
        let source = page::assemble(&page_name, &body, self.config.page_padding);
        let line_count = source.split('\n').count();

        info!(
            "Generated {page_name}: {widget_count} widgets in {row_count} rows, {line_count} lines"
        );

        GeneratedCode {
            page_name,
            source,
            line_count,
            widget_count,
            row_count,
        }
    }

    /// Leaf widgets of the first `preview_limit` detections in reading order.
    #[must_use]
    pub fn preview(&self, detections: &[Detection]) -> String {
        self.preview_with_limit(detections, self.config.preview_limit)
    }

    /// Like [`preview`](Self::preview) with an explicit limit.
    #[must_use]
    pub fn preview_with_limit(&self, detections: &[Detection], limit: usize) -> String {
        let sorted = self.sort(detections);
        page::preview(&self.synthesizer(), &sorted, limit)
    }
}
