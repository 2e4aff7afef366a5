// ABOUTME: Request tracing helpers for correlating log lines with HTTP requests
// ABOUTME: Builds the per-request span used by the router's trace layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::http::Request;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::Span;

/// Header carrying a caller-supplied correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

static NEXT_REQUEST: AtomicU64 = AtomicU64::new(1);

/// Correlation id for a request: the caller's `x-request-id`, or a fresh one
pub fn request_id<B>(request: &Request<B>) -> String {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .map_or_else(
            || format!("req_{:08}", NEXT_REQUEST.fetch_add(1, Ordering::Relaxed)),
            str::to_owned,
        )
}

/// Create the tracing span for one HTTP request
pub fn create_request_span<B>(request: &Request<B>) -> Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id(request),
        user_id = tracing::field::Empty,
    )
}
