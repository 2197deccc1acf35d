use std::collections::{HashMap, VecDeque};

use serde::Serialize;
use spanlens_core::model::span::SpanRecord;
use tracing::debug;

use crate::tree::SpanTree;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GraphNode {
    pub span_id: String,
    pub depth_column: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GraphEdge {
    pub source_span_id: String,
    pub target_span_id: String,
}

#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Dependency graph: breadth-first depth columns plus parent→child edges.
///
/// Every root candidate seeds the traversal at column 0 simultaneously, and
/// the first-discovered depth wins, so each span is assigned exactly once
/// even under cycles or duplicate edges. Spans no rooted walk can reach
/// (a pure parent cycle) are seeded at column 0 themselves, so the node set
/// always covers every well-formed span.
pub fn build_dependency_graph(spans: &[SpanRecord]) -> DependencyGraph {
    let tree = SpanTree::build(spans);
    if tree.is_empty() {
        return DependencyGraph::default();
    }

    let mut depths: HashMap<&str, usize> = HashMap::new();
    let mut queue: VecDeque<&SpanRecord> = VecDeque::new();

    for root in tree.roots() {
        if !depths.contains_key(root.span_id.as_str()) {
            depths.insert(root.span_id.as_str(), 0);
            queue.push_back(root);
        }
    }

    bfs(&tree, &mut depths, &mut queue);

    // Spans the rooted walk never reached (a pure parent cycle) are all
    // independent roots: seed every one of them at column 0 before walking
    // again, so no cycle member ends up a column below its peers.
    for span in tree.spans() {
        if !depths.contains_key(span.span_id.as_str()) {
            debug!(span_id = %span.span_id, "span unreachable from any root, seeding at column 0");
            depths.insert(span.span_id.as_str(), 0);
            queue.push_back(span);
        }
    }
    bfs(&tree, &mut depths, &mut queue);

    let nodes = tree
        .spans()
        .iter()
        .map(|s| GraphNode {
            span_id: s.span_id.clone(),
            depth_column: depths.get(s.span_id.as_str()).copied().unwrap_or(0),
        })
        .collect();

    let edges = tree
        .spans()
        .iter()
        .filter_map(|s| {
            let parent = s.parent_span_id.as_deref()?;
            // Edges to parents outside the set are dropped; the child is
            // already a synthetic root.
            tree.contains(parent).then(|| GraphEdge {
                source_span_id: parent.to_string(),
                target_span_id: s.span_id.clone(),
            })
        })
        .collect();

    DependencyGraph { nodes, edges }
}

fn bfs<'a>(
    tree: &SpanTree<'a>,
    depths: &mut HashMap<&'a str, usize>,
    queue: &mut VecDeque<&'a SpanRecord>,
) {
    while let Some(span) = queue.pop_front() {
        let column = depths[span.span_id.as_str()];
        for child in tree.children_of(&span.span_id) {
            if !depths.contains_key(child.span_id.as_str()) {
                depths.insert(child.span_id.as_str(), column + 1);
                queue.push_back(child);
            }
        }
    }
}
