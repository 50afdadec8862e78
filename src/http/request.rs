//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for tracing
//! - Extract the fields the inspector scans: raw query, headers, body
//! - Prefer header names exactly as sent over hyper's lowercased copies
//! - Apply the Content-Length rule for POST bodies
//!
//! # Design Decisions
//! - Query is taken as sent; percent-encoding is not decoded
//! - Missing or non-numeric Content-Length means an empty body
//! - Body bytes are decoded as lossy UTF-8 so binary payloads still get scanned
//! - A body cut short is inspected as far as it was read

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header::CONTENT_LENGTH, request::Parts, HeaderMap, HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use http_body_util::BodyExt;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::inspection::InspectedRequest;
use crate::net::HeadRecorder;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates a fresh UUID v4 for every request lacking an `x-request-id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// The request ID set by the request-id layer, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Declared body length. Missing or non-numeric values count as zero.
pub fn declared_content_length(headers: &HeaderMap) -> usize {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0)
}

/// Every header as a (name, value) pair, duplicates included.
pub fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_owned(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

/// Header pairs exactly as the client sent them, in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireHeaders(pub Vec<(String, String)>);

/// Middleware that attaches the connection's raw header pairs to the request.
///
/// Runs for every request, routed or not, so the connection's head log stays
/// in step with hyper.
pub async fn capture_wire_headers(mut req: Request<Body>, next: Next) -> Response {
    let recorder = req
        .extensions()
        .get::<ConnectInfo<HeadRecorder>>()
        .map(|ConnectInfo(recorder)| recorder.clone());

    if let Some(recorder) = recorder {
        let target = req.uri().to_string();
        match recorder.take_head(req.method().as_str(), &target) {
            Some(headers) => {
                req.extensions_mut().insert(WireHeaders(headers));
            }
            None => tracing::debug!("Raw headers unavailable, using normalized names"),
        }
    }

    next.run(req).await
}

/// Build the inspected view of a request head. The body is filled in later.
pub fn inspected_head(parts: &Parts) -> InspectedRequest {
    let headers = match parts.extensions.get::<WireHeaders>() {
        Some(WireHeaders(pairs)) => pairs.clone(),
        None => header_pairs(&parts.headers),
    };

    InspectedRequest {
        query: parts.uri.query().unwrap_or_default().to_owned(),
        headers,
        body: None,
    }
}

/// Read at most `declared_length` bytes of body as text.
///
/// If the body ends early or fails, whatever arrived is returned.
pub async fn read_body(mut body: Body, declared_length: usize) -> String {
    if declared_length == 0 {
        return String::new();
    }

    let mut bytes = Vec::with_capacity(declared_length);
    while bytes.len() < declared_length {
        match body.frame().await {
            Some(Ok(frame)) => {
                if let Some(data) = frame.data_ref() {
                    bytes.extend_from_slice(data);
                }
            }
            Some(Err(e)) => {
                tracing::warn!(
                    error = %e,
                    received = bytes.len(),
                    declared = declared_length,
                    "Request body cut short, inspecting what arrived"
                );
                break;
            }
            None => break,
        }
    }
    bytes.truncate(declared_length);

    String::from_utf8_lossy(&bytes).into_owned()
}
