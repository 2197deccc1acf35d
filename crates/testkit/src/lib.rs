use chrono::{Duration, TimeZone, Utc};
use spanlens_core::model::span::{SpanKind, SpanRecord, SpanStatus};

pub fn fresh_trace_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Builds one span offset from a fixed base instant. Negative offsets model
/// clock skew ahead of the trace start.
pub fn span(
    trace_id: &str,
    span_id: &str,
    parent: Option<&str>,
    start_offset_ms: i64,
    duration_ms: f64,
) -> SpanRecord {
    let base = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
    SpanRecord {
        trace_id: trace_id.to_string(),
        span_id: span_id.to_string(),
        parent_span_id: parent.map(str::to_string),
        service: "api".to_string(),
        name: format!("op.{span_id}"),
        start_ts: base + Duration::milliseconds(start_offset_ms),
        duration_ms,
        kind: SpanKind::Internal,
        status: SpanStatus::Ok,
        http_method: None,
        http_path: None,
        http_status: None,
        db_statement: None,
        attrs_json: "{}".to_string(),
    }
}

/// Three-span trace with the proportions used throughout the layout tests:
/// a 100ms root whose children take 60% and 40% of the sibling total, at
/// +5ms and +10ms from trace start.
pub fn sample_trace(trace_id: &str) -> Vec<SpanRecord> {
    vec![
        span(trace_id, "r", None, 0, 100.0),
        span(trace_id, "a", Some("r"), 5, 60.0),
        span(trace_id, "b", Some("r"), 10, 40.0),
    ]
}

/// Two-level trace across services: a gateway root fanning out to auth and
/// orders, with a failing database call under orders.
pub fn fan_out_trace(trace_id: &str) -> Vec<SpanRecord> {
    let base = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
    vec![
        SpanRecord {
            trace_id: trace_id.to_string(),
            span_id: "root".to_string(),
            parent_span_id: None,
            service: "gateway".to_string(),
            name: "GET /v1/orders".to_string(),
            start_ts: base,
            duration_ms: 120.0,
            kind: SpanKind::Server,
            status: SpanStatus::Ok,
            http_method: Some("GET".to_string()),
            http_path: Some("/v1/orders".to_string()),
            http_status: Some(200),
            db_statement: None,
            attrs_json: "{}".to_string(),
        },
        SpanRecord {
            trace_id: trace_id.to_string(),
            span_id: "auth".to_string(),
            parent_span_id: Some("root".to_string()),
            service: "auth".to_string(),
            name: "check token".to_string(),
            start_ts: base + Duration::milliseconds(4),
            duration_ms: 18.0,
            kind: SpanKind::Client,
            status: SpanStatus::Ok,
            http_method: None,
            http_path: None,
            http_status: None,
            db_statement: None,
            attrs_json: "{}".to_string(),
        },
        SpanRecord {
            trace_id: trace_id.to_string(),
            span_id: "orders".to_string(),
            parent_span_id: Some("root".to_string()),
            service: "orders".to_string(),
            name: "list orders".to_string(),
            start_ts: base + Duration::milliseconds(25),
            duration_ms: 80.0,
            kind: SpanKind::Server,
            status: SpanStatus::Ok,
            http_method: None,
            http_path: None,
            http_status: None,
            db_statement: None,
            attrs_json: serde_json::json!({"peer": "orders:8080"}).to_string(),
        },
        SpanRecord {
            trace_id: trace_id.to_string(),
            span_id: "orders-db".to_string(),
            parent_span_id: Some("orders".to_string()),
            service: "orders".to_string(),
            name: "SELECT orders".to_string(),
            start_ts: base + Duration::milliseconds(30),
            duration_ms: 65.0,
            kind: SpanKind::Client,
            status: SpanStatus::Error,
            http_method: None,
            http_path: None,
            http_status: None,
            db_statement: Some("SELECT * FROM orders WHERE user_id = ?".to_string()),
            attrs_json: serde_json::json!({"peer": "postgres:5432"}).to_string(),
        },
    ]
}

/// Two spans referencing each other as parents: no resolvable root, one
/// parent cycle. Exercises the visited-set guards.
pub fn cyclic_spans(trace_id: &str) -> Vec<SpanRecord> {
    vec![
        span(trace_id, "a", Some("b"), 0, 20.0),
        span(trace_id, "b", Some("a"), 3, 10.0),
    ]
}
