use std::collections::HashSet;

use serde::Serialize;
use spanlens_core::model::span::SpanRecord;
use tracing::debug;

use crate::tree::SpanTree;

/// One rectangle in a flame graph. `start_offset` and `width_ratio` are
/// normalized to [0, 1] relative to the root's full extent.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FlameBlock {
    pub span: SpanRecord,
    pub depth: usize,
    pub start_offset: f64,
    pub width_ratio: f64,
}

#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct FlameLayout {
    pub blocks: Vec<FlameBlock>,
    pub max_depth: usize,
}

/// Proportional flame layout: each child's width is its share of the
/// siblings' summed duration, nested inside the parent's extent. The first
/// root in input order anchors the layout; spans unreachable from it are
/// omitted.
pub fn build_flame_layout(spans: &[SpanRecord]) -> FlameLayout {
    let tree = SpanTree::build(spans);
    let Some(root) = tree.first_root() else {
        return FlameLayout::default();
    };

    let mut layout = FlameLayout::default();
    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(root.span_id.as_str());
    place_proportional(&tree, root, 0, 0.0, 1.0, &mut visited, &mut layout);
    layout
}

fn place_proportional<'a>(
    tree: &SpanTree<'a>,
    span: &'a SpanRecord,
    depth: usize,
    start_offset: f64,
    width_ratio: f64,
    visited: &mut HashSet<&'a str>,
    layout: &mut FlameLayout,
) {
    layout.max_depth = layout.max_depth.max(depth);
    layout.blocks.push(FlameBlock {
        span: span.clone(),
        depth,
        start_offset,
        width_ratio,
    });

    let children = unvisited_children(tree, span, visited);
    let total: f64 = children.iter().map(|c| c.duration_ms).sum();

    let mut running_offset = start_offset;
    for child in children {
        // Zero-duration sibling groups degrade to zero-width blocks rather
        // than dividing by zero.
        let child_width = if total > 0.0 {
            width_ratio * (child.duration_ms / total)
        } else {
            0.0
        };
        place_proportional(
            tree,
            child,
            depth + 1,
            running_offset,
            child_width,
            visited,
            layout,
        );
        running_offset += child_width;
    }
}

/// Timestamp-anchored flame layout: blocks are positioned by wall-clock
/// offset from the root and sized by their share of the root's duration.
/// Children whose timestamps or durations are inconsistent with the root's
/// extent produce offsets outside [0, 1]; they are emitted as-is for the
/// renderer to handle.
pub fn build_flame_timeline(spans: &[SpanRecord]) -> FlameLayout {
    let tree = SpanTree::build(spans);
    let Some(root) = tree.first_root() else {
        return FlameLayout::default();
    };

    let mut layout = FlameLayout::default();
    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(root.span_id.as_str());
    place_timed(&tree, root, root, 0, &mut visited, &mut layout);
    layout
}

fn place_timed<'a>(
    tree: &SpanTree<'a>,
    root: &'a SpanRecord,
    span: &'a SpanRecord,
    depth: usize,
    visited: &mut HashSet<&'a str>,
    layout: &mut FlameLayout,
) {
    let (start_offset, width_ratio) = if root.duration_ms > 0.0 {
        (
            (span.start_ms() - root.start_ms()) / root.duration_ms,
            span.duration_ms / root.duration_ms,
        )
    } else {
        (0.0, 0.0)
    };

    layout.max_depth = layout.max_depth.max(depth);
    layout.blocks.push(FlameBlock {
        span: span.clone(),
        depth,
        start_offset,
        width_ratio,
    });

    for child in unvisited_children(tree, span, visited) {
        place_timed(tree, root, child, depth + 1, visited, layout);
    }
}

fn unvisited_children<'a>(
    tree: &SpanTree<'a>,
    span: &'a SpanRecord,
    visited: &mut HashSet<&'a str>,
) -> Vec<&'a SpanRecord> {
    tree.children_of(&span.span_id)
        .iter()
        .filter(|c| {
            let fresh = visited.insert(c.span_id.as_str());
            if !fresh {
                debug!(span_id = %c.span_id, "cycle broken in flame traversal");
            }
            fresh
        })
        .copied()
        .collect()
}
