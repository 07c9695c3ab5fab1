//! Minimal W3C Trace Context propagation.
//!
//! Headers are built by hand; there is no OpenTelemetry exporter behind this,
//! the ids only let a receiving service correlate requests with our logs.

use http::{HeaderMap, HeaderName, HeaderValue};
use tracing::Span;

/// W3C Trace Context header name
pub const TRACEPARENT: &str = "traceparent";

/// Generate a fresh sampled `traceparent` and record its trace id on `span`.
pub fn inject_trace_context(headers: &mut HeaderMap, span: &Span) {
    let trace_id = format!("{:032x}", rand::random::<u128>());
    let span_id = format!("{:016x}", rand::random::<u64>());
    let traceparent = format!("00-{}-{}-01", trace_id, span_id);

    if let Ok(value) = HeaderValue::from_str(&traceparent) {
        headers.insert(HeaderName::from_static(TRACEPARENT), value);
        span.record("trace_id", trace_id.as_str());
    }
}
