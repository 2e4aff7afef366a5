// ABOUTME: Main library entry point for the agent caddie
// ABOUTME: Club recommendations from shot conditions, player history, and a text-generation model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Agent Caddie
//!
//! Recommends a golf club for a shot. The shot's conditions are turned into an
//! effective distance, similar past shots are retrieved by embedding
//! similarity, and a chat model is asked for a club given both. After the shot
//! the carry is classified and, unless it was a mis-hit, added to the player's
//! history so future recommendations can learn from it.
//!
//! ## Architecture
//!
//! - **Analytics**: pure distance adjustments and outcome classification
//! - **Intake**: question schema and answer validation shared by HTTP and CLI
//! - **LLM**: chat and embedding provider traits with an `OpenAI` client
//! - **Database**: shot store trait with Supabase and in-memory backends
//! - **Services**: the persistence gateway and the caddie service
//! - **Routes**: axum HTTP API
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use agent_caddie::analytics;
//! use agent_caddie::models::{Scenario, Wind};
//!
//! let scenario = Scenario::new(150.0, "Rough", "Level", "Level", Wind::new("Headwind", 10.0));
//! let plan = analytics::plan(scenario);
//! assert!((plan.effective_distance - 163.0).abs() < f64::EPSILON);
//! ```

/// Distance adjustments and outcome classification
pub mod analytics;

/// Environment configuration
pub mod config;

/// Shot store backends
pub mod database;

/// Question schema and answer validation
pub mod intake;

/// Chat and embedding providers
pub mod llm;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Prompt composition and recommendation text handling
pub mod recommendation;

/// HTTP routes
pub mod routes;

/// Caddie and persistence services
pub mod services;

/// HTTP client helpers
pub mod utils;

// Core types live in caddie-core; re-export them at the crate root
pub use caddie_core::{constants, errors, models};
