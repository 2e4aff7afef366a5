// ABOUTME: Domain service layer shared by the HTTP routes and the CLI
// ABOUTME: Orchestrates planning, retrieval, recommendation, and outcome recording
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Business rules live here so the HTTP server and the interactive CLI apply
//! them identically.

/// Caddie orchestration: plan, recommend, record
pub mod caddie;

/// Persistence gateway: embeddings plus the shot store
pub mod gateway;

pub use caddie::{CaddieService, CaddieSettings, Recommendation, RecordShot, RecordedShot};
pub use gateway::{PersistenceGateway, ShotInsert};
