//! # Sketchgen Core - Detection to Flutter Code Generation
//!
//! Turns UI element detections from a hand-drawn sketch (kind + normalized
//! bounding box) into the source of a Flutter page.
//!
//! ## Quick Start
//!
//! ```rust
//! use sketchgen_core::{samples, CodeGenerator};
//!
//! let generator = CodeGenerator::default();
//! let code = generator.generate(&samples::login_form(), "LoginPage");
//!
//! assert!(code.source.starts_with("import 'package:flutter/material.dart';"));
//! assert_eq!(code.widget_count, 7);
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | JSON input | [`input`] |
//! | Raw detector output to typed detections | [`detection`], [`taxonomy`] |
//! | Reading order and row grouping | [`reading_order`] |
//! | Layout tree | [`layout`] |
//! | Widget expressions | [`synth`] |
//! | Page scaffold and preview | [`page`] |
//!
//! [`CodeGenerator`] runs the stages in order. Generation is total: any input,
//! including empty or degenerate geometry, produces a complete page.
//!
//! ## Configuration
//!
//! ```rust
//! use sketchgen_core::{CodeGenerator, GeneratorConfigBuilder};
//!
//! # fn main() -> sketchgen_core::Result<()> {
//! let config = GeneratorConfigBuilder::compact()
//!     .row_threshold(0.05)
//!     .build()?;
//! let generator = CodeGenerator::new(config);
//! # let _ = generator;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod detection;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod page;
pub mod reading_order;
pub mod samples;
pub mod synth;
pub mod taxonomy;

pub use config::{GeneratorConfig, GeneratorConfigBuilder};
pub use detection::{ingest, suppress_overlaps, BoxOrigin, Detection, IngestOptions, RawObservation};
pub use error::{Result, SketchError};
pub use generator::{CodeGenerator, GeneratedCode};
pub use geometry::{NormalizedRect, ReferenceCanvas};
pub use input::{parse_detections, DetectionSet, InputFormat};
pub use layout::{LayoutBuilder, LayoutNode};
pub use reading_order::{ReadingOrder, ReadingOrderConfig, Row, RowStrategy};
pub use synth::{GeneratedFragment, Synthesizer, WidgetMetrics};
pub use taxonomy::{classify, ElementKind, LabelMap};
