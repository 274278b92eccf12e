//! Property-Based Tests
//!
//! Invariants of the generation pipeline over arbitrary detection sets:
//! - Output is deterministic and independent of input order
//! - Row count is bounded by the detection count
//! - Rows run top-to-bottom and sorted output is the concatenation of rows
//! - Generation never panics, whatever the geometry

use proptest::prelude::*;
use sketchgen_core::{
    CodeGenerator, Detection, ElementKind, GeneratorConfigBuilder, NormalizedRect,
    ReadingOrder, ReadingOrderConfig, Row, RowStrategy,
};

fn kind_strategy() -> impl Strategy<Value = ElementKind> {
    (0..ElementKind::ALL.len()).prop_map(|i| ElementKind::ALL[i])
}

fn detection_strategy() -> impl Strategy<Value = Detection> {
    (
        kind_strategy(),
        0.0f32..1.0,
        0.0f32..1.0,
        0.0f32..0.5,
        0.0f32..0.2,
        proptest::option::of("[A-Za-z '$]{0,12}"),
    )
        .prop_map(|(kind, x, y, w, h, label)| {
            let det = Detection::new(kind, NormalizedRect::new(x, y, w, h));
            match label {
                Some(label) => det.with_label(label),
                None => det,
            }
        })
}

fn strategy_strategy() -> impl Strategy<Value = RowStrategy> {
    prop_oneof![Just(RowStrategy::DriftingAnchor), Just(RowStrategy::RowAnchor)]
}

// ============================================================================
// Determinism and Order Invariance
// ============================================================================

/// Property: repeated calls produce identical output
#[test]
fn proptest_generate_is_deterministic() {
    proptest!(|(detections in prop::collection::vec(detection_strategy(), 0..20))| {
        let generator = CodeGenerator::default();
        let first = generator.generate(&detections, "Page");
        let second = generator.generate(&detections, "Page");
        prop_assert_eq!(first, second);
    });
}

/// Property: any permutation of the input yields the same page
#[test]
fn proptest_generate_is_order_invariant() {
    proptest!(|(
        pair in prop::collection::vec(detection_strategy(), 0..20)
            .prop_flat_map(|d| (Just(d.clone()), Just(d).prop_shuffle())),
        strategy in strategy_strategy()
    )| {
        let (detections, shuffled) = pair;
        let generator = CodeGenerator::new(
            GeneratorConfigBuilder::new().row_strategy(strategy).build().unwrap(),
        );
        let expected = generator.generate(&detections, "Page");
        let actual = generator.generate(&shuffled, "Page");
        prop_assert_eq!(expected.source, actual.source);
    });
}

// ============================================================================
// Row Segmentation
// ============================================================================

/// Property: rows never outnumber detections, and every detection lands in
/// exactly one row
#[test]
fn proptest_row_count_bounded() {
    proptest!(|(
        detections in prop::collection::vec(detection_strategy(), 0..30),
        threshold in 0.01f32..0.5,
        strategy in strategy_strategy()
    )| {
        let order = ReadingOrder::new(ReadingOrderConfig { row_threshold: threshold, strategy });
        let rows = order.rows(&detections);
        prop_assert!(rows.len() <= detections.len());
        prop_assert_eq!(rows.iter().map(|r| r.len()).sum::<usize>(), detections.len());
        prop_assert!(rows.iter().all(|r| !r.is_empty()));
    });
}

/// Detections stacked in small vertical steps, so drifting bands often
/// chain several members and span more than the threshold
fn clustered_detections() -> impl Strategy<Value = Vec<Detection>> {
    prop::collection::vec((kind_strategy(), 0.0f32..1.0, 0.0f32..0.08), 0..30).prop_map(|steps| {
        let mut y = 0.0f32;
        steps
            .into_iter()
            .map(|(kind, x, step)| {
                y += step;
                Detection::new(kind, NormalizedRect::new(x, y, 0.1, 0.05))
            })
            .collect()
    })
}

fn row_top(row: &Row) -> f32 {
    row.detections
        .iter()
        .map(|d| d.bounding_box.y)
        .fold(f32::INFINITY, f32::min)
}

/// Property: rows run top-to-bottom, each row runs left-to-right, and the
/// sorted sequence is the concatenation of the rows
#[test]
fn proptest_sort_consistent_with_rows() {
    proptest!(|(
        detections in prop_oneof![
            prop::collection::vec(detection_strategy(), 0..30),
            clustered_detections()
        ],
        strategy in strategy_strategy()
    )| {
        let order = ReadingOrder::new(ReadingOrderConfig { row_threshold: 0.08, strategy });
        let rows = order.rows(&detections);
        let sorted = order.sort(&detections);
        prop_assert_eq!(sorted.len(), detections.len());

        for row in &rows {
            let xs: Vec<f32> = row.detections.iter().map(|d| d.bounding_box.x).collect();
            prop_assert!(xs.windows(2).all(|w| w[0] <= w[1]), "row not left-to-right: {:?}", xs);
        }

        let tops: Vec<f32> = rows.iter().map(row_top).collect();
        prop_assert!(tops.windows(2).all(|w| w[0] < w[1]), "rows not top-to-bottom: {:?}", tops);

        let flattened: Vec<Detection> = rows.into_iter().flat_map(|r| r.detections).collect();
        prop_assert_eq!(&sorted, &flattened);

        // Sorting is idempotent
        prop_assert_eq!(order.sort(&sorted), sorted);
    });
}

/// Property: detections spaced further apart than the threshold each get a row
#[test]
fn proptest_spread_detections_get_own_rows() {
    proptest!(|(count in 1usize..10, x in 0.0f32..0.9)| {
        let detections: Vec<Detection> = (0..count)
            .map(|i| Detection::new(ElementKind::Text, NormalizedRect::new(x, i as f32 * 0.1, 0.1, 0.05)))
            .collect();
        let code = CodeGenerator::default().generate(&detections, "Page");
        prop_assert_eq!(code.row_count, count);
    });
}

// ============================================================================
// Robustness
// ============================================================================

/// Property: arbitrary floats (NaN, infinities, negatives) never panic
#[test]
fn proptest_arbitrary_geometry_no_panic() {
    proptest!(|(values in prop::collection::vec(
        (kind_strategy(), any::<f32>(), any::<f32>(), any::<f32>(), any::<f32>()),
        0..15
    ))| {
        let detections: Vec<Detection> = values
            .into_iter()
            .map(|(kind, x, y, w, h)| Detection::new(kind, NormalizedRect::new(x, y, w, h)))
            .collect();
        let code = CodeGenerator::default().generate(&detections, "Page");
        prop_assert!(code.source.contains("class Page extends StatefulWidget"));
    });
}

/// Property: any page name yields a valid Dart class identifier
#[test]
fn proptest_page_name_is_identifier() {
    proptest!(|(name in "\\PC{0,30}")| {
        let code = CodeGenerator::default().generate(&[], &name);
        let mut chars = code.page_name.chars();
        let first = chars.next().unwrap();
        prop_assert!(first.is_ascii_uppercase());
        prop_assert!(chars.all(|c| c.is_ascii_alphanumeric()));
    });
}
