use std::collections::HashMap;

use serde::Serialize;
use spanlens_core::model::span::SpanRecord;

use crate::tree::SpanTree;

/// Header statistics for one trace, recomputed from the span snapshot.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TraceSummary {
    pub trace_id: String,
    pub root_name: String,
    pub duration_ms: f64,
    pub span_count: usize,
    pub error_count: usize,
    pub by_service: Vec<(String, usize)>,
}

/// Summarizes a span collection for the trace header: duration comes from
/// the root when one resolves, otherwise the longest span duration observed.
pub fn summarize_trace(spans: &[SpanRecord]) -> Option<TraceSummary> {
    let tree = SpanTree::build(spans);
    let first = *tree.spans().first()?;
    let root = tree.first_root();

    let duration_ms = match root {
        Some(r) => r.duration_ms,
        None => tree
            .spans()
            .iter()
            .map(|s| s.duration_ms)
            .fold(0.0, f64::max),
    };

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for span in tree.spans() {
        *counts.entry(span.service.as_str()).or_default() += 1;
    }
    let mut by_service: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    by_service.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    Some(TraceSummary {
        trace_id: first.trace_id.clone(),
        root_name: root.map(|r| r.name.clone()).unwrap_or_default(),
        duration_ms,
        span_count: tree.spans().len(),
        error_count: tree.spans().iter().filter(|s| s.is_error()).count(),
        by_service,
    })
}
