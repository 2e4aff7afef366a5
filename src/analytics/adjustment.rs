// ABOUTME: Effective distance calculator applying lie and wind corrections
// ABOUTME: Unknown lies and crosswinds contribute nothing; elevation is never consulted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{lie_adjustments, wind};
use crate::models::{Lie, Scenario, ShotPlan, Wind, WindDirection};

/// Yards added to the target for the lie under the ball
///
/// Only the lie feeds this table. Ball position is recorded separately and
/// does not contribute.
#[must_use]
pub fn lie_adjustment(lie: &Lie) -> f64 {
    match lie {
        Lie::AboveFeet => lie_adjustments::ABOVE_FEET_YARDS,
        Lie::BelowFeet => lie_adjustments::BELOW_FEET_YARDS,
        Lie::Rough => lie_adjustments::ROUGH_YARDS,
        Lie::SandBunker => lie_adjustments::SAND_BUNKER_YARDS,
        Lie::Fairway | Lie::TreeLine | Lie::PineStraw | Lie::Level | Lie::Other(_) => 0.0,
    }
}

/// Yards added to the target for wind along the target line
#[must_use]
pub fn wind_adjustment(wind: &Wind) -> f64 {
    match wind.direction {
        WindDirection::Headwind => wind::YARDS_PER_MPH * wind.speed_mph,
        WindDirection::Tailwind => -wind::YARDS_PER_MPH * wind.speed_mph,
        WindDirection::LeftToRight
        | WindDirection::RightToLeft
        | WindDirection::NoWind
        | WindDirection::Other(_) => 0.0,
    }
}

/// Distance the shot plays, in yards
#[must_use]
pub fn effective_distance(scenario: &Scenario) -> f64 {
    scenario.distance + lie_adjustment(&scenario.lie) + wind_adjustment(&scenario.wind)
}

/// Pair a scenario with its effective distance
#[must_use]
pub fn plan(scenario: Scenario) -> ShotPlan {
    let effective_distance = effective_distance(&scenario);
    ShotPlan {
        scenario,
        effective_distance,
    }
}
