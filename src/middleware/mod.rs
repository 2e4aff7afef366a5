// ABOUTME: HTTP middleware for the caddie API: CORS and per-request tracing spans
// ABOUTME: Layers are assembled by the router; this module only builds them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod cors;
pub mod tracing;

// CORS configuration
pub use cors::setup_cors;

// Request tracing
pub use tracing::{create_request_span, request_id, REQUEST_ID_HEADER};
