//! JSON detection input.
//!
//! Accepted shapes:
//! - an array of detections: `[{"kind": "button", "bounding_box": {...}}]`
//! - a page object: `{"page_name": "Login", "detections": [...]}`
//! - an array of raw observations: `[{"label": "button", "confidence": 0.9, "bounding_box": {...}}]`
//! - a page object with raw observations: `{"page_name": "Login", "observations": [...]}`
//!
//! Raw observations go through [`ingest`](crate::detection::ingest).

use crate::detection::{ingest, Detection, IngestOptions, RawObservation};
use crate::error::{Result, SketchError};
use log::debug;
use serde::Deserialize;
use serde_json::Value;

/// How to interpret an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// Detect from the document shape
    #[default]
    Auto,
    /// Typed detections
    Detections,
    /// Raw detector observations
    Raw,
}

/// Parsed input: detections plus an optional page name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetectionSet {
    pub page_name: Option<String>,
    pub detections: Vec<Detection>,
}

#[derive(Deserialize)]
struct PageDocument {
    #[serde(default)]
    page_name: Option<String>,
    #[serde(default)]
    detections: Option<Vec<Detection>>,
    #[serde(default)]
    observations: Option<Vec<RawObservation>>,
}

/// Parse a JSON document into detections.
///
/// # Errors
///
/// [`SketchError::Parse`] if the text is not JSON or an array does not match
/// the requested format. [`SketchError::Input`] if a page object lacks the
/// array the format selects, or carries one the format would drop.
pub fn parse_detections(
    json: &str,
    format: InputFormat,
    options: &IngestOptions,
) -> Result<DetectionSet> {
    let value: Value = serde_json::from_str(json)?;

    let set = match value {
        Value::Object(_) => {
            let page: PageDocument = serde_json::from_value(value)?;
            let detections = match (format, page.detections, page.observations) {
                (InputFormat::Auto, None, None) => {
                    return Err(SketchError::Input(
                        "page object has neither `detections` nor `observations`".to_string(),
                    ));
                }
                (InputFormat::Auto, detections, observations) => {
                    let mut detections = detections.unwrap_or_default();
                    if let Some(observations) = observations {
                        detections.extend(ingest(&observations, options));
                    }
                    detections
                }
                (InputFormat::Detections, Some(detections), None) => detections,
                (InputFormat::Detections, _, _) => {
                    return Err(SketchError::Input(
                        "expected a `detections` array and no `observations`".to_string(),
                    ));
                }
                (InputFormat::Raw, None, Some(observations)) => ingest(&observations, options),
                (InputFormat::Raw, _, _) => {
                    return Err(SketchError::Input(
                        "expected an `observations` array and no `detections`".to_string(),
                    ));
                }
            };
            DetectionSet {
                page_name: page.page_name,
                detections,
            }
        }
        other => {
            let raw = match format {
                InputFormat::Raw => true,
                InputFormat::Detections => false,
                InputFormat::Auto => looks_raw(&other),
            };
            let detections = if raw {
                let observations: Vec<RawObservation> = serde_json::from_value(other)?;
                ingest(&observations, options)
            } else {
                serde_json::from_value(other)?
            };
            DetectionSet {
                page_name: None,
                detections,
            }
        }
    };

    debug!("Parsed {} detections ({format:?})", set.detections.len());
    Ok(set)
}

/// An array whose first element has no `kind` field holds raw observations.
fn looks_raw(value: &Value) -> bool {
    value
        .as_array()
        .and_then(|items| items.first())
        .is_some_and(|first| first.get("kind").is_none())
}
