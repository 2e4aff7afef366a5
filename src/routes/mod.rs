// ABOUTME: Route module organization for the caddie HTTP API
// ABOUTME: Assembles the banner, health, and caddie routes with CORS and request tracing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the caddie server
//!
//! Each domain module holds route definitions and thin handlers that delegate
//! to [`CaddieService`].

/// Caddie recommendation and recording routes
pub mod caddie;
/// Banner and health check routes
pub mod health;

pub use caddie::{CaddieRoutes, RecommendRequest, RecordRequest};
pub use health::HealthRoutes;

use axum::{body::Body, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::middleware::{create_request_span, setup_cors};
use crate::services::CaddieService;

/// Build the complete application router
pub fn app_router(service: Arc<CaddieService>, cors_origins: &[String]) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(CaddieRoutes::routes(service))
        .layer(TraceLayer::new_for_http().make_span_with(create_request_span::<Body>))
        .layer(setup_cors(cors_origins))
}
