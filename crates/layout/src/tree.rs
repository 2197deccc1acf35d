use std::collections::{HashMap, HashSet};

use spanlens_core::model::span::SpanRecord;
use tracing::warn;

/// Parent→children adjacency over one span collection, built in a single
/// pass. Spans failing validation are dropped here so every layout engine
/// sees the same cleaned set.
///
/// A span is a root when its parent reference is absent or does not resolve
/// to any span in the collection. Orphaned references are expected from
/// partial traces and are promoted rather than rejected.
pub struct SpanTree<'a> {
    spans: Vec<&'a SpanRecord>,
    children: HashMap<&'a str, Vec<&'a SpanRecord>>,
    roots: Vec<&'a SpanRecord>,
    ids: HashSet<&'a str>,
}

impl<'a> SpanTree<'a> {
    pub fn build(spans: &'a [SpanRecord]) -> Self {
        let mut kept = Vec::with_capacity(spans.len());
        for span in spans {
            match span.validate() {
                Ok(()) => kept.push(span),
                Err(e) => warn!(error = %e, "skipping malformed span"),
            }
        }

        let ids: HashSet<&str> = kept.iter().map(|s| s.span_id.as_str()).collect();
        let mut children: HashMap<&str, Vec<&SpanRecord>> = HashMap::new();
        let mut roots = Vec::new();
        for span in &kept {
            match span.parent_span_id.as_deref() {
                Some(parent) if ids.contains(parent) => {
                    children.entry(parent).or_default().push(span);
                }
                _ => roots.push(*span),
            }
        }

        Self {
            spans: kept,
            children,
            roots,
            ids,
        }
    }

    /// Well-formed spans in input order.
    pub fn spans(&self) -> &[&'a SpanRecord] {
        &self.spans
    }

    /// Root candidates in input order.
    pub fn roots(&self) -> &[&'a SpanRecord] {
        &self.roots
    }

    pub fn first_root(&self) -> Option<&'a SpanRecord> {
        self.roots.first().copied()
    }

    pub fn children_of(&self, span_id: &str) -> &[&'a SpanRecord] {
        self.children.get(span_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, span_id: &str) -> bool {
        self.ids.contains(span_id)
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testkit::{cyclic_spans, sample_trace, span};

    #[test]
    fn groups_children_and_picks_root() {
        let spans = sample_trace("t1");
        let tree = SpanTree::build(&spans);

        assert_eq!(tree.roots().len(), 1);
        assert_eq!(tree.first_root().unwrap().span_id, "r");
        let kids: Vec<_> = tree.children_of("r").iter().map(|s| s.span_id.as_str()).collect();
        assert_eq!(kids, vec!["a", "b"]);
        assert!(tree.children_of("a").is_empty());
    }

    #[test]
    fn orphaned_parent_reference_promotes_to_root() {
        let spans = vec![
            span("t1", "a", None, 0, 10.0),
            span("t1", "b", Some("missing"), 5, 5.0),
        ];
        let tree = SpanTree::build(&spans);

        let roots: Vec<_> = tree.roots().iter().map(|s| s.span_id.as_str()).collect();
        assert_eq!(roots, vec!["a", "b"]);
    }

    #[test]
    fn malformed_spans_are_dropped_individually() {
        let mut spans = sample_trace("t1");
        spans.push(span("t1", "bad", Some("r"), 0, f64::NAN));
        spans.push(span("t1", "", Some("r"), 0, 1.0));
        let tree = SpanTree::build(&spans);

        assert_eq!(tree.spans().len(), 3);
        assert_eq!(tree.children_of("r").len(), 2);
    }

    #[test]
    fn fully_cyclic_set_has_no_roots() {
        let spans = cyclic_spans("t1");
        let tree = SpanTree::build(&spans);

        assert!(tree.roots().is_empty());
        assert_eq!(tree.spans().len(), 2);
    }
}
