use serde::Serialize;
use spanlens_core::model::span::SpanRecord;

use crate::tree::SpanTree;

/// One horizontal bar in a waterfall view. `relative_start_ms` is the offset
/// from trace start and may be negative under clock skew; it is surfaced
/// as-is rather than clamped.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WaterfallRow {
    pub span: SpanRecord,
    pub relative_start_ms: f64,
    pub duration_ms: f64,
}

/// Waterfall layout: one row per well-formed span regardless of tree
/// connectivity. Rows are ordered for display as non-root spans by
/// descending start timestamp, then the root last; the renderer reverses
/// the list top-to-bottom so the root lands on top.
pub fn build_waterfall_layout(spans: &[SpanRecord]) -> Vec<WaterfallRow> {
    let tree = SpanTree::build(spans);
    if tree.is_empty() {
        return Vec::new();
    }

    let root = tree.first_root();
    let trace_start_ms = match root {
        Some(r) => r.start_ms(),
        None => tree
            .spans()
            .iter()
            .map(|s| s.start_ms())
            .fold(f64::INFINITY, f64::min),
    };

    let mut rest: Vec<&SpanRecord> = tree
        .spans()
        .iter()
        .copied()
        .filter(|s| !root.is_some_and(|r| std::ptr::eq(*s, r)))
        .collect();
    // Stable sort keeps input order among spans sharing a start timestamp.
    rest.sort_by(|a, b| b.start_ms().total_cmp(&a.start_ms()));

    let mut rows: Vec<WaterfallRow> = rest
        .into_iter()
        .map(|s| row(s, trace_start_ms))
        .collect();
    if let Some(r) = root {
        rows.push(row(r, trace_start_ms));
    }
    rows
}

fn row(span: &SpanRecord, trace_start_ms: f64) -> WaterfallRow {
    WaterfallRow {
        span: span.clone(),
        relative_start_ms: span.start_ms() - trace_start_ms,
        duration_ms: span.duration_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testkit::{cyclic_spans, sample_trace, span};

    #[test]
    fn orders_descending_with_root_last() {
        let rows = build_waterfall_layout(&sample_trace("t1"));

        let ids: Vec<_> = rows.iter().map(|r| r.span.span_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "r"]);
        assert_eq!(rows[0].relative_start_ms, 10.0);
        assert_eq!(rows[1].relative_start_ms, 5.0);
        assert_eq!(rows[2].relative_start_ms, 0.0);
    }

    #[test]
    fn emits_every_span_regardless_of_connectivity() {
        let mut spans = sample_trace("t1");
        spans.push(span("t1", "orphan-child", Some("nowhere"), 20, 2.0));
        let rows = build_waterfall_layout(&spans);

        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn negative_offsets_survive() {
        let spans = vec![
            span("t1", "r", None, 0, 100.0),
            span("t1", "early", Some("r"), -7, 3.0),
        ];
        let rows = build_waterfall_layout(&spans);

        let early = rows.iter().find(|r| r.span.span_id == "early").unwrap();
        assert_eq!(early.relative_start_ms, -7.0);
    }

    #[test]
    fn rootless_set_anchors_to_minimum_timestamp() {
        let rows = build_waterfall_layout(&cyclic_spans("t1"));

        assert_eq!(rows.len(), 2);
        let min = rows
            .iter()
            .map(|r| r.relative_start_ms)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(min, 0.0);
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(build_waterfall_layout(&[]).is_empty());
    }
}
