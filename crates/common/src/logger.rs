//! Per-request logging middleware
//!
//! Wraps each request in an `http_request` span and emits a single
//! `http request` event once the response status is known. Install with
//! `axum::middleware::from_fn_with_state(logger, request_logger)`.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;

use crate::header;
use crate::skipper::{self, Skipper};

/// Configuration for [`request_logger`]
#[derive(Clone)]
pub struct RequestLogger {
    skipper: Skipper,
    headers: Arc<[HeaderName]>,
}

impl Default for RequestLogger {
    fn default() -> Self {
        Self::new(skipper::never())
    }
}

impl RequestLogger {
    pub fn new(skipper: Skipper) -> Self {
        Self {
            skipper,
            headers: Arc::from(Vec::new()),
        }
    }

    /// Record the values of these request headers on every event
    pub fn with_headers<I>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = HeaderName>,
    {
        self.headers = headers.into_iter().collect::<Vec<_>>().into();
        self
    }

    /// Render the configured headers as `name="v1; v2"` pairs.
    ///
    /// Absent headers render with an empty value so the field set is stable.
    pub fn render_headers(&self, headers: &HeaderMap) -> String {
        self.headers
            .iter()
            .map(|name| {
                let values: Vec<&str> = headers
                    .get_all(name)
                    .iter()
                    .filter_map(|v| v.to_str().ok())
                    .collect();
                format!("{}=\"{}\"", name, values.join("; "))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Log one event per request, after the downstream service has answered
pub async fn request_logger(
    State(logger): State<RequestLogger>,
    req: Request,
    next: Next,
) -> Response {
    if (logger.skipper)(&req) {
        return next.run(req).await;
    }

    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let request_id = header::request_id(req.headers())
        .unwrap_or_default()
        .to_owned();
    let headers = logger.render_headers(req.headers());

    let span = tracing::info_span!(
        "http_request",
        method = %method,
        path = %path,
        request_id = %request_id,
    );

    let response = next.run(req).instrument(span.clone()).await;
    let status = response.status().as_u16();

    span.in_scope(|| {
        if headers.is_empty() {
            tracing::info!(status, "http request");
        } else {
            tracing::info!(status, headers = %headers, "http request");
        }
    });

    response
}
