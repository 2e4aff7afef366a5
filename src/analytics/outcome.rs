// ABOUTME: Classifies a shot as perfect, too short, or too long from its carry
// ABOUTME: The perfect band is inclusive at plus or minus five yards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::outcome::PERFECT_TOLERANCE_YARDS;
use crate::models::{ShotOutcome, ShotResult};

/// Classify a carry against its target
///
/// The returned outcome never carries a cause; attach one with
/// [`ShotOutcome::with_cause`] once the player has been asked.
#[must_use]
pub fn classify(target: f64, carried: f64) -> ShotOutcome {
    let error = carried - target;
    let result = if error < -PERFECT_TOLERANCE_YARDS {
        ShotResult::TooShort
    } else if error > PERFECT_TOLERANCE_YARDS {
        ShotResult::TooLong
    } else {
        ShotResult::Perfect
    };

    ShotOutcome {
        carried,
        error,
        result,
        cause: None,
    }
}
