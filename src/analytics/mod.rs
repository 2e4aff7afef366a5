// ABOUTME: Pure shot calculators: effective distance and outcome classification
// ABOUTME: Deterministic functions with no I/O, shared by the service, CLI, and benches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Shot Analytics
//!
//! Two leaf calculators sit under everything else in the crate:
//!
//! - [`effective_distance`] corrects the base distance for lie and wind
//! - [`classify`] turns a target and a carry into a [`ShotOutcome`](crate::models::ShotOutcome)
//!
//! Neither can fail and neither rounds.

/// Lie and wind adjustments
pub mod adjustment;
/// Outcome classification
pub mod outcome;

pub use adjustment::{effective_distance, lie_adjustment, plan, wind_adjustment};
pub use outcome::classify;
