//! Widget synthesis: layout tree to Flutter widget expression.
//!
//! Leaves are rendered through the per-kind template table in [`templates`];
//! containers are rendered recursively with two-space indentation per level.

pub mod templates;

use crate::detection::Detection;
use crate::geometry::ReferenceCanvas;
use crate::layout::LayoutNode;
use log::warn;

pub use templates::{dart_string, template_for, TemplateFn, WidgetParams};

/// Pixel size of a leaf on the reference canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidgetMetrics {
    pub width: u32,
    pub height: u32,
}

/// Source of a single leaf widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFragment {
    /// Dart expression, empty for kinds that render nothing
    pub source: String,
    pub metrics: WidgetMetrics,
}

impl GeneratedFragment {
    /// Whether the fragment contributes nothing to the page
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

/// Renders layout trees against a reference canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Synthesizer {
    canvas: ReferenceCanvas,
}

impl Synthesizer {
    #[inline]
    #[must_use]
    pub const fn new(canvas: ReferenceCanvas) -> Self {
        Self { canvas }
    }

    #[inline]
    #[must_use]
    pub const fn canvas(&self) -> &ReferenceCanvas {
        &self.canvas
    }

    /// Render one detection with its kind's template.
    #[must_use]
    pub fn fragment(&self, detection: &Detection) -> GeneratedFragment {
        let rect = &detection.bounding_box;
        if !rect.is_within_unit_square() {
            warn!(
                "{} box out of range ({}, {}, {}, {}), sizes clamped",
                detection.kind, rect.x, rect.y, rect.width, rect.height
            );
        }

        let metrics = WidgetMetrics {
            width: self.canvas.pixel_width(rect),
            height: self.canvas.pixel_height(rect),
        };
        let params = WidgetParams {
            text: detection.display_text(),
            width: metrics.width,
            height: metrics.height,
        };

        GeneratedFragment {
            source: template_for(detection.kind)(&params),
            metrics,
        }
    }

    /// Render a layout tree as a single Dart expression starting at column
    /// zero. Empty fragments are dropped from children lists.
    #[must_use = "returns the generated widget source"]
    pub fn synthesize(&self, node: &LayoutNode) -> String {
        match node {
            LayoutNode::Leaf(detection) => self.fragment(detection).source,
            LayoutNode::Spacer(height) => format!("const SizedBox(height: {height})"),
            LayoutNode::Column(children) => {
                let items = self.render_children(children, |child| child);
                render_list(
                    "Column",
                    "crossAxisAlignment: CrossAxisAlignment.stretch",
                    &items,
                )
            }
            LayoutNode::Row(children) => {
                let items = self.render_children(children, |child| {
                    format!("Expanded(\n  child: {},\n)", indent_tail(&child, 2))
                });
                render_list(
                    "Row",
                    "mainAxisAlignment: MainAxisAlignment.spaceBetween",
                    &items,
                )
            }
        }
    }

    fn render_children<F>(&self, children: &[LayoutNode], wrap: F) -> Vec<String>
    where
        F: Fn(String) -> String,
    {
        children
            .iter()
            .map(|child| self.synthesize(child))
            .filter(|source| !source.is_empty())
            .map(wrap)
            .collect()
    }
}

fn render_list(widget: &str, alignment: &str, items: &[String]) -> String {
    let mut out = format!("{widget}(\n  {alignment},\n");
    if items.is_empty() {
        out.push_str("  children: [],\n)");
        return out;
    }

    out.push_str("  children: [\n");
    for item in items {
        out.push_str(&indent_all(item, 4));
        out.push_str(",\n");
    }
    out.push_str("  ],\n)");
    out
}

/// Indent every non-empty line.
#[must_use]
pub fn indent_all(source: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    source
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Indent every non-empty line but the first, for expressions that continue
/// an already-indented line.
#[must_use]
pub fn indent_tail(source: &str, spaces: usize) -> String {
    match source.split_once('\n') {
        Some((first, rest)) => format!("{first}\n{}", indent_all(rest, spaces)),
        None => source.to_string(),
    }
}
