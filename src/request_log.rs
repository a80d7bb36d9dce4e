//! Request timing and the one-line access log.

use crate::config::{LogLevel, Settings};
use axum::{
    body::{to_bytes, Body, Bytes},
    extract::{ConnectInfo, Query, Request, State},
    http::{Method, Uri},
    middleware::Next,
    response::Response,
};
use serde_json::{Map, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Inserted into request extensions before the request is routed.
#[derive(Clone, Copy, Debug)]
pub struct RequestTiming {
    start: Instant,
}

impl RequestTiming {
    pub fn start() -> Self {
        RequestTiming { start: Instant::now() }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// `[GET] -> [/v2/student/1] from:127.0.0.1 costs:0.412 ms`
pub fn request_line(method: &Method, path: &str, remote: &str, elapsed_ms: f64) -> String {
    format!("[{method}] -> [{path}] from:{remote} costs:{elapsed_ms:.3} ms")
}

/// Suffix appended at DEBUG level.
pub fn debug_payload(params: &Value, body: &Value) -> String {
    format!(" data:{{\n\tparam: {params}, \n\tbody: {body}\n}} ")
}

/// Query parameters as a JSON object; repeated keys keep the last value.
pub fn query_params(uri: &Uri) -> Value {
    let map: Map<String, Value> = Query::<Vec<(String, String)>>::try_from_uri(uri)
        .map(|Query(pairs)| pairs.into_iter().map(|(k, v)| (k, Value::String(v))).collect())
        .unwrap_or_default();
    Value::Object(map)
}

/// Parsed JSON body, or `{}` when the body is missing, unparsable or falsy.
pub fn body_or_empty(bytes: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(v) if !is_falsy(&v) => v,
        _ => Value::Object(Map::new()),
    }
}

fn is_falsy(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn remote_addr(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Records the start time, then logs one line per request when request logging is on.
pub async fn log_request(State(settings): State<Arc<Settings>>, mut request: Request, next: Next) -> Response {
    let timing = RequestTiming::start();
    request.extensions_mut().insert(timing);
    if !settings.log.request_log {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let remote = remote_addr(&request);

    let payload = if settings.log.level == LogLevel::Debug {
        let params = query_params(request.uri());
        let (parts, body) = request.into_parts();
        // An unbufferable body reaches the handler empty and is rejected there.
        let bytes = match to_bytes(body, settings.body_limit).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(error = %e, "unable to buffer request body");
                Bytes::new()
            }
        };
        let body = body_or_empty(&bytes);
        request = Request::from_parts(parts, Body::from(bytes));
        Some((params, body))
    } else {
        None
    };

    let response = next.run(request).await;

    let line = request_line(&method, &path, &remote, timing.elapsed_ms());
    match payload {
        Some((params, body)) => {
            tracing::debug!("{}{}", line, debug_payload(&params, &body));
        }
        None => tracing::info!("{}", line),
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn formats_request_line() {
        let line = request_line(&Method::DELETE, "/v2/student/3", "10.0.0.1", 1.23456);
        assert_eq!(line, "[DELETE] -> [/v2/student/3] from:10.0.0.1 costs:1.235 ms");
    }

    #[test]
    fn formats_debug_payload() {
        let payload = debug_payload(&json!({ "q": "Ann" }), &json!({}));
        assert_eq!(payload, " data:{\n\tparam: {\"q\":\"Ann\"}, \n\tbody: {}\n} ");
    }

    #[test]
    fn unparsable_or_empty_bodies_default_to_empty_object() {
        assert_eq!(body_or_empty(b""), json!({}));
        assert_eq!(body_or_empty(b"name=Ann"), json!({}));
        assert_eq!(body_or_empty(b"null"), json!({}));
        assert_eq!(body_or_empty(b"[]"), json!({}));
        assert_eq!(body_or_empty(br#"{"name":"Ann"}"#), json!({ "name": "Ann" }));
    }

    #[test]
    fn query_params_as_object() {
        let uri: Uri = "/v2/student/search?q=An&q=Bo&x=1".parse().unwrap();
        assert_eq!(query_params(&uri), json!({ "q": "Bo", "x": "1" }));
        let bare: Uri = "/v2/student".parse().unwrap();
        assert_eq!(query_params(&bare), json!({}));
    }

    #[test]
    fn timing_is_monotonic() {
        let timing = RequestTiming::start();
        assert!(timing.elapsed_ms() >= 0.0);
    }
}
