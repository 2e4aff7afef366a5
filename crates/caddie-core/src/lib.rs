// ABOUTME: Core types and constants for the agent caddie club recommender
// ABOUTME: Foundation crate with error handling, shot domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Caddie Core
//!
//! Foundation crate providing shared types and constants for the caddie.
//! It changes rarely, so the root crate and binaries can build on top of it
//! without recompiling these definitions.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Adjustment table values, thresholds, and collaborator names
//! - **models**: Scenario, shot outcome, shot record, and club distance types

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Shot domain models shared by the calculator, composer, and storage layers
pub mod models;
