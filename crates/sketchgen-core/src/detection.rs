//! Detection records and ingestion of raw detector output.
//!
//! A [`Detection`] is the typed input of the pipeline. Detectors usually emit
//! something rawer: a class label string, a confidence, and a box that may use
//! a bottom-left origin. [`ingest`] turns those [`RawObservation`]s into
//! detections: confidence filtering, classification through a [`LabelMap`],
//! origin conversion and optional per-kind non-maximum suppression.

use crate::geometry::NormalizedRect;
use crate::taxonomy::{ElementKind, LabelMap};
use log::debug;
use serde::{Deserialize, Serialize};

/// A classified, normalized bounding box produced by an external detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Semantic category
    pub kind: ElementKind,
    /// Normalized box, origin top-left
    #[serde(alias = "bbox")]
    pub bounding_box: NormalizedRect,
    /// Confidence score (0-1)
    #[serde(default = "default_confidence")]
    pub confidence: f32,
    /// Text shown by the generated widget (defaults to the kind's display name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

const fn default_confidence() -> f32 {
    1.0
}

impl Detection {
    /// Create an unlabeled detection with full confidence
    #[must_use]
    pub const fn new(kind: ElementKind, bounding_box: NormalizedRect) -> Self {
        Self {
            kind,
            bounding_box,
            confidence: 1.0,
            label: None,
        }
    }

    /// Set the display label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the confidence
    #[must_use]
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    /// Text the widget should display: the trimmed label, or the kind's
    /// display name when the label is absent or blank.
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| self.kind.display_name())
    }
}

/// Coordinate origin of a raw observation's box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxOrigin {
    /// y grows downwards (pipeline convention)
    #[default]
    TopLeft,
    /// y grows upwards (Vision framework convention)
    BottomLeft,
}

/// Unclassified detector output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    /// Detector class label, e.g. "button" or "cell phone"
    pub label: String,
    /// Confidence score (0-1)
    pub confidence: f32,
    /// Normalized box in `origin` coordinates
    #[serde(alias = "bbox")]
    pub bounding_box: NormalizedRect,
    /// Coordinate origin of `bounding_box`
    #[serde(default)]
    pub origin: BoxOrigin,
    /// Recognized text inside the box, if any (becomes the widget label)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Options for [`ingest`].
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOptions {
    /// Observations must score strictly above this to be kept
    pub min_confidence: f32,
    /// When set, overlapping observations of the same kind with `IoU` at or
    /// above this threshold are suppressed, keeping the most confident
    pub iou_threshold: Option<f32>,
    /// Label-to-kind table
    pub label_map: LabelMap,
}

impl Default for IngestOptions {
    #[inline]
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            iou_threshold: None,
            label_map: LabelMap::default(),
        }
    }
}

/// Convert raw observations into typed detections.
///
/// Output order follows descending confidence when NMS is enabled, input
/// order otherwise. The layout pipeline sorts spatially, so callers need not
/// care.
#[must_use]
pub fn ingest(observations: &[RawObservation], options: &IngestOptions) -> Vec<Detection> {
    let detections: Vec<Detection> = observations
        .iter()
        .filter(|obs| obs.confidence > options.min_confidence)
        .map(|obs| {
            let rect = obs.bounding_box;
            let bounding_box = match obs.origin {
                BoxOrigin::TopLeft => rect,
                BoxOrigin::BottomLeft => {
                    NormalizedRect::from_bottom_left(rect.x, rect.y, rect.width, rect.height)
                }
            };
            Detection {
                kind: options.label_map.classify(&obs.label),
                bounding_box,
                confidence: obs.confidence,
                label: obs.text.clone(),
            }
        })
        .collect();

    debug!(
        "Ingested {} of {} observations (min_confidence={})",
        detections.len(),
        observations.len(),
        options.min_confidence
    );

    match options.iou_threshold {
        Some(threshold) => suppress_overlaps(detections, threshold),
        None => detections,
    }
}

/// Non-maximum suppression per kind.
#[must_use]
pub fn suppress_overlaps(mut detections: Vec<Detection>, iou_threshold: f32) -> Vec<Detection> {
    // Highest confidence first; stable so equal scores keep input order
    detections.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let before = detections.len();
    let mut keep: Vec<Detection> = Vec::with_capacity(detections.len());
    for det in detections {
        let duplicate = keep.iter().any(|kept| {
            kept.kind == det.kind && kept.bounding_box.iou(&det.bounding_box) >= iou_threshold
        });
        if !duplicate {
            keep.push(det);
        }
    }

    debug!("Detections after NMS: {} (was {before})", keep.len());
    keep
}
