// ABOUTME: Service banner and health check route handlers
// ABOUTME: Unauthenticated, stateless endpoints for load balancers and smoke checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::constants::service_names;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the banner and health routes
    pub fn routes() -> Router {
        Router::new()
            .route("/", get(Self::banner))
            .route("/health", get(Self::health))
    }

    async fn banner() -> Json<Value> {
        Json(json!({
            "message": "Agent Caddie API is running",
            "service": service_names::AGENT_CADDIE,
            "version": env!("CARGO_PKG_VERSION")
        }))
    }

    async fn health() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }
}
