//! Reading order and row segmentation.
//!
//! Detections are read top-to-bottom, and left-to-right within a row. Two
//! detections belong to the same row when their top edges are closer than
//! `row_threshold` (strict `<`), as decided by [`RowStrategy::accepts`].
//!
//! Sorting with a pairwise "same row → compare x, else compare y" comparator
//! is not transitive and can panic `sort_by`. Instead [`ReadingOrder::rows`]:
//! 1. sorts by a total vertical key,
//! 2. runs [`ReadingOrder::segment`] over that sequence to form bands,
//! 3. sorts each band by a total horizontal key.
//!
//! [`ReadingOrder::sort`] is the concatenation of those bands. Each band
//! starts below every member of the band before it, so row tops ascend.
//!
//! With [`RowStrategy::DriftingAnchor`] a band can span more than
//! `row_threshold`, and scanning its x-sorted members again may split it.
//! Callers that need rows take them from [`ReadingOrder::rows`] rather than
//! segmenting the output of [`ReadingOrder::sort`].

use crate::detection::Detection;
use log::trace;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Default row tolerance, as a fraction of the canvas height.
pub const DEFAULT_ROW_THRESHOLD: f32 = 0.08;

/// How a detection is compared against the current row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStrategy {
    /// Compare against the previously processed detection.
    ///
    /// Row membership can drift: a diagonal run of closely spaced detections
    /// lands in one row even when its ends are further apart than the
    /// threshold.
    #[default]
    DriftingAnchor,
    /// Compare against the top edge of the row (the smallest `y` seen in it).
    ///
    /// Every pair of detections in a row is within the threshold.
    RowAnchor,
}

impl RowStrategy {
    /// Whether a detection at `y` joins a row whose topmost member is at
    /// `row_top` and whose most recent member is at `last_y`.
    #[inline]
    #[must_use]
    pub fn accepts(self, row_top: f32, last_y: f32, y: f32, threshold: f32) -> bool {
        let reference = match self {
            Self::DriftingAnchor => last_y,
            Self::RowAnchor => row_top,
        };
        (y - reference).abs() < threshold
    }
}

impl std::str::FromStr for RowStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "drifting_anchor" | "drifting" => Ok(Self::DriftingAnchor),
            "row_anchor" | "anchor" | "strict" => Ok(Self::RowAnchor),
            other => Err(format!(
                "unknown row strategy '{other}' (expected drifting_anchor or row_anchor)"
            )),
        }
    }
}

/// Configuration for reading order and segmentation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingOrderConfig {
    /// Vertical tolerance (normalized) under which detections share a row
    pub row_threshold: f32,
    /// Row membership rule
    pub strategy: RowStrategy,
}

impl Default for ReadingOrderConfig {
    #[inline]
    fn default() -> Self {
        Self {
            row_threshold: DEFAULT_ROW_THRESHOLD,
            strategy: RowStrategy::DriftingAnchor,
        }
    }
}

/// A horizontally adjacent group of detections sharing a vertical band.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    /// Members, left to right
    pub detections: Vec<Detection>,
}

impl Row {
    /// Number of detections in the row
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.detections.len()
    }

    /// True if the row has no members
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}

/// Sorter and row segmenter sharing one [`ReadingOrderConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReadingOrder {
    config: ReadingOrderConfig,
}

impl ReadingOrder {
    /// Creates a reading order with the given configuration.
    #[inline]
    #[must_use = "returns a new ReadingOrder instance"]
    pub const fn new(config: ReadingOrderConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &ReadingOrderConfig {
        &self.config
    }

    /// Rows in reading order: top-to-bottom bands, each left-to-right.
    ///
    /// The result does not depend on the order of the input.
    #[must_use = "returns the rows in reading order"]
    pub fn rows(&self, detections: &[Detection]) -> Vec<Row> {
        let mut by_y = detections.to_vec();
        by_y.sort_by(compare_vertical);

        let mut bands = self.segment(by_y);
        for band in &mut bands {
            band.detections.sort_by(compare_horizontal);
        }
        bands
    }

    /// Order detections top-to-bottom, then left-to-right within each row.
    ///
    /// Equal to the concatenation of [`rows`](Self::rows).
    #[must_use = "returns the detections in reading order"]
    pub fn sort(&self, detections: &[Detection]) -> Vec<Detection> {
        self.rows(detections)
            .into_iter()
            .flat_map(|row| row.detections)
            .collect()
    }

    /// Group detections into rows with a single scan.
    ///
    /// Expects ascending top edges; members keep their input order. Zero
    /// detections yield zero rows.
    #[must_use = "returns the segmented rows"]
    pub fn segment<I>(&self, sorted: I) -> Vec<Row>
    where
        I: IntoIterator<Item = Detection>,
    {
        let ReadingOrderConfig {
            row_threshold,
            strategy,
        } = self.config;

        let mut rows = Vec::new();
        let mut current = Row::default();
        let mut row_top = 0.0_f32;
        let mut last_y = 0.0_f32;

        for detection in sorted {
            let y = detection.bounding_box.y;
            if current.is_empty() || strategy.accepts(row_top, last_y, y, row_threshold) {
                row_top = if current.is_empty() { y } else { row_top.min(y) };
            } else {
                rows.push(std::mem::take(&mut current));
                row_top = y;
            }
            current.detections.push(detection);
            last_y = y;
        }

        if !current.is_empty() {
            rows.push(current);
        }

        trace!("Segmented into {} rows ({:?})", rows.len(), strategy);
        rows
    }
}

/// Total order: top edge, then left edge, then the remaining fields.
fn compare_vertical(a: &Detection, b: &Detection) -> Ordering {
    a.bounding_box
        .y
        .total_cmp(&b.bounding_box.y)
        .then_with(|| a.bounding_box.x.total_cmp(&b.bounding_box.x))
        .then_with(|| tie_break(a, b))
}

/// Total order: left edge, then top edge, then the remaining fields.
fn compare_horizontal(a: &Detection, b: &Detection) -> Ordering {
    a.bounding_box
        .x
        .total_cmp(&b.bounding_box.x)
        .then_with(|| a.bounding_box.y.total_cmp(&b.bounding_box.y))
        .then_with(|| tie_break(a, b))
}

/// Makes the sort independent of input order for detections sharing a
/// position. Exact duplicates compare equal and keep their relative order.
fn tie_break(a: &Detection, b: &Detection) -> Ordering {
    a.kind
        .cmp(&b.kind)
        .then_with(|| a.bounding_box.width.total_cmp(&b.bounding_box.width))
        .then_with(|| a.bounding_box.height.total_cmp(&b.bounding_box.height))
        .then_with(|| a.confidence.total_cmp(&b.confidence))
        .then_with(|| a.label.cmp(&b.label))
}
