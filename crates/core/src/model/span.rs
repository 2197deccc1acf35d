use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpanlensError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SpanKind {
    Server,
    Client,
    Internal,
    #[default]
    Unspecified,
}

impl FromStr for SpanKind {
    type Err = SpanlensError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SERVER" => Ok(Self::Server),
            "CLIENT" => Ok(Self::Client),
            "INTERNAL" => Ok(Self::Internal),
            "" | "UNSPECIFIED" => Ok(Self::Unspecified),
            _ => Err(SpanlensError::Parse(format!("unknown span kind: {s}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SpanStatus {
    #[default]
    Ok,
    Error,
}

impl FromStr for SpanStatus {
    type Err = SpanlensError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "" | "OK" => Ok(Self::Ok),
            "ERROR" => Ok(Self::Error),
            _ => Err(SpanlensError::Parse(format!("unknown span status: {s}"))),
        }
    }
}

/// One timed unit of work in a trace, as supplied by the query backend.
///
/// `duration_ms` is carried as reported rather than derived from an end
/// timestamp: child durations may exceed the parent's remaining time and the
/// layout engines must see that inconsistency, not a corrected value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpanRecord {
    pub trace_id: String,
    pub span_id: String,
    pub parent_span_id: Option<String>,
    pub service: String,
    pub name: String,
    pub start_ts: DateTime<Utc>,
    pub duration_ms: f64,
    pub kind: SpanKind,
    pub status: SpanStatus,
    pub http_method: Option<String>,
    pub http_path: Option<String>,
    pub http_status: Option<u16>,
    pub db_statement: Option<String>,
    pub attrs_json: String,
}

impl SpanRecord {
    pub fn start_ms(&self) -> f64 {
        self.start_ts.timestamp_millis() as f64
    }

    /// Checks the fields layout geometry depends on. Spans failing this are
    /// skipped individually by the layout engines; the rest of the batch
    /// still renders.
    pub fn validate(&self) -> Result<()> {
        if self.span_id.is_empty() {
            return Err(SpanlensError::InvalidSpan("empty span_id".to_string()));
        }
        if !self.duration_ms.is_finite() {
            return Err(SpanlensError::InvalidSpan(format!(
                "non-numeric duration for span {}",
                self.span_id
            )));
        }
        if self.duration_ms < 0.0 {
            return Err(SpanlensError::InvalidSpan(format!(
                "negative duration for span {}",
                self.span_id
            )));
        }
        Ok(())
    }

    pub fn is_error(&self) -> bool {
        self.status == SpanStatus::Error
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn span(id: &str, duration_ms: f64) -> SpanRecord {
        SpanRecord {
            trace_id: "t1".to_string(),
            span_id: id.to_string(),
            parent_span_id: None,
            service: "api".to_string(),
            name: "GET /v1/orders".to_string(),
            start_ts: Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
            duration_ms,
            kind: SpanKind::Server,
            status: SpanStatus::Ok,
            http_method: None,
            http_path: None,
            http_status: None,
            db_statement: None,
            attrs_json: "{}".to_string(),
        }
    }

    #[test]
    fn kind_and_status_parse() {
        assert_eq!(SpanKind::from_str("server").unwrap(), SpanKind::Server);
        assert_eq!(SpanKind::from_str("").unwrap(), SpanKind::Unspecified);
        assert!(SpanKind::from_str("producer").is_err());
        assert_eq!(SpanStatus::from_str("error").unwrap(), SpanStatus::Error);
        assert!(SpanStatus::from_str("unset").is_err());
    }

    #[test]
    fn validate_accepts_well_formed() {
        assert!(span("a", 12.5).validate().is_ok());
        assert!(span("a", 0.0).validate().is_ok());
    }

    #[test]
    fn validate_rejects_malformed() {
        assert!(span("", 1.0).validate().is_err());
        assert!(span("a", f64::NAN).validate().is_err());
        assert!(span("a", f64::INFINITY).validate().is_err());
        assert!(span("a", -1.0).validate().is_err());
    }
}
