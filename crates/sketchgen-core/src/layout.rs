//! Layout tree built from segmented rows.
//!
//! The tree is purely structural: a root column whose children are either a
//! single detection (one-element rows are not wrapped) or a horizontal row of
//! detections, each followed by a fixed-height spacer. Nothing is reordered.

use crate::detection::Detection;
use crate::reading_order::Row;

/// Default vertical gap between column children, in logical pixels.
pub const DEFAULT_ROW_GAP: u32 = 16;

/// Node of the layout tree.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutNode {
    /// A single detected element
    Leaf(Detection),
    /// Children laid out horizontally, sharing the width equally
    Row(Vec<LayoutNode>),
    /// Children stacked vertically, stretched to the full width
    Column(Vec<LayoutNode>),
    /// Fixed vertical gap
    Spacer(u32),
}

impl LayoutNode {
    /// Children of a container node, empty for leaves and spacers
    #[must_use]
    pub fn children(&self) -> &[LayoutNode] {
        match self {
            Self::Row(children) | Self::Column(children) => children,
            Self::Leaf(_) | Self::Spacer(_) => &[],
        }
    }

    /// Number of leaves in the subtree
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Spacer(_) => 0,
            Self::Row(children) | Self::Column(children) => {
                children.iter().map(Self::leaf_count).sum()
            }
        }
    }

    /// Leaves in tree order
    #[must_use]
    pub fn leaves(&self) -> Vec<&Detection> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Detection>) {
        match self {
            Self::Leaf(detection) => out.push(detection),
            Self::Spacer(_) => {}
            Self::Row(children) | Self::Column(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

/// Turns rows into a single root [`LayoutNode::Column`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutBuilder {
    /// Height of the spacer inserted after each row
    pub row_gap: u32,
    /// Keep the spacer after the last row
    pub trailing_spacer: bool,
}

impl Default for LayoutBuilder {
    #[inline]
    fn default() -> Self {
        Self {
            row_gap: DEFAULT_ROW_GAP,
            trailing_spacer: true,
        }
    }
}

impl LayoutBuilder {
    /// Create a builder
    #[inline]
    #[must_use]
    pub const fn new(row_gap: u32, trailing_spacer: bool) -> Self {
        Self {
            row_gap,
            trailing_spacer,
        }
    }

    /// Build the root column.
    ///
    /// Detections that render nothing (status bars) are dropped first, so a
    /// row of only status bars leaves no node and no spacer. A spacer follows
    /// every remaining row, the last one included unless `trailing_spacer` is
    /// off.
    #[must_use = "returns the layout tree"]
    pub fn build(&self, rows: Vec<Row>) -> LayoutNode {
        let nodes: Vec<LayoutNode> = rows
            .into_iter()
            .filter_map(|row| {
                let mut members: Vec<Detection> = row
                    .detections
                    .into_iter()
                    .filter(|detection| detection.kind.is_rendered())
                    .collect();
                match members.len() {
                    0 => None,
                    1 => members.pop().map(LayoutNode::Leaf),
                    _ => Some(LayoutNode::Row(
                        members.into_iter().map(LayoutNode::Leaf).collect(),
                    )),
                }
            })
            .collect();

        let node_count = nodes.len();
        let mut children = Vec::with_capacity(node_count * 2);
        for (index, node) in nodes.into_iter().enumerate() {
            children.push(node);
            let is_last = index + 1 == node_count;
            if !is_last || self.trailing_spacer {
                children.push(LayoutNode::Spacer(self.row_gap));
            }
        }

        LayoutNode::Column(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::NormalizedRect;
    use crate::taxonomy::ElementKind;

    fn row(count: usize) -> Row {
        Row {
            detections: (0..count)
                .map(|i| {
                    Detection::new(
                        ElementKind::Text,
                        NormalizedRect::new(i as f32 * 0.2, 0.1, 0.1, 0.05),
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn test_empty_rows_build_empty_column() {
        let tree = LayoutBuilder::default().build(Vec::new());
        assert_eq!(tree, LayoutNode::Column(Vec::new()));
        assert_eq!(tree.leaf_count(), 0);
    }

    #[test]
    fn test_single_element_row_is_unwrapped() {
        let tree = LayoutBuilder::default().build(vec![row(1)]);
        let children = tree.children();
        assert_eq!(children.len(), 2);
        assert!(matches!(children[0], LayoutNode::Leaf(_)));
        assert_eq!(children[1], LayoutNode::Spacer(DEFAULT_ROW_GAP));
    }

    #[test]
    fn test_multi_element_row_is_wrapped() {
        let tree = LayoutBuilder::default().build(vec![row(3), row(1)]);
        let children = tree.children();
        assert_eq!(children.len(), 4);
        match &children[0] {
            LayoutNode::Row(members) => {
                assert_eq!(members.len(), 3);
                assert!(members.iter().all(|m| matches!(m, LayoutNode::Leaf(_))));
            }
            other => panic!("expected a row, got {other:?}"),
        }
        assert!(matches!(children[2], LayoutNode::Leaf(_)));
        assert_eq!(tree.leaf_count(), 4);
    }

    #[test]
    fn test_trailing_spacer_can_be_dropped() {
        let tree = LayoutBuilder::new(8, false).build(vec![row(1), row(2)]);
        let children = tree.children();
        assert_eq!(children.len(), 3);
        assert_eq!(children[1], LayoutNode::Spacer(8));
        assert!(matches!(children[2], LayoutNode::Row(_)));
    }

    #[test]
    fn test_status_bars_leave_no_node_or_spacer() {
        let status = |x: f32| {
            Detection::new(ElementKind::StatusBar, NormalizedRect::new(x, 0.0, 0.2, 0.03))
        };
        let status_only = Row {
            detections: vec![status(0.0), status(0.5)],
        };
        let mut mixed = row(1);
        mixed.detections.push(status(0.6));

        let tree = LayoutBuilder::default().build(vec![status_only, mixed, row(1)]);
        let children = tree.children();
        assert_eq!(children.len(), 4);
        assert!(matches!(children[0], LayoutNode::Leaf(_)));
        assert_eq!(children[1], LayoutNode::Spacer(DEFAULT_ROW_GAP));
        assert!(matches!(children[2], LayoutNode::Leaf(_)));
        assert_eq!(tree.leaf_count(), 2);
    }

    #[test]
    fn test_trailing_status_bar_row_keeps_spacer_rule() {
        let status = Row {
            detections: vec![Detection::new(
                ElementKind::StatusBar,
                NormalizedRect::new(0.0, 0.9, 1.0, 0.03),
            )],
        };
        let tree = LayoutBuilder::new(8, false).build(vec![row(1), status]);
        assert_eq!(tree.children().len(), 1);
    }

    #[test]
    fn test_leaves_preserve_order() {
        let tree = LayoutBuilder::default().build(vec![row(2), row(1)]);
        let xs: Vec<f32> = tree.leaves().iter().map(|d| d.bounding_box.x).collect();
        assert_eq!(xs, vec![0.0, 0.2, 0.0]);
    }
}
