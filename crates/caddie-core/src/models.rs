// ABOUTME: Shot domain models: scenario, wind, outcome, shot record, and club distance
// ABOUTME: Label enums tolerate unknown values so unexpected lies never reject a request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Shot Domain Models
//!
//! Scenario fields arrive as free-form labels (from a form, a terminal prompt,
//! or a stored row). The label enums below recognise the known values and keep
//! anything else verbatim in an `Other` variant, which contributes no
//! adjustment downstream.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $label:literal $(| $alias:literal)*
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
            /// Unrecognised label, preserved verbatim
            Other(String),
        }

        impl $name {
            /// Canonical labels of the known variants
            pub const LABELS: &'static [&'static str] = &[$($label),+];

            /// Parse a label, case-insensitively, falling back to `Other`
            #[must_use]
            pub fn from_label(label: &str) -> Self {
                let trimmed = label.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($label)
                        $(|| trimmed.eq_ignore_ascii_case($alias))*
                    {
                        return Self::$variant;
                    }
                )+
                Self::Other(trimmed.to_owned())
            }

            /// Canonical label for this value
            #[must_use]
            pub fn label(&self) -> &str {
                match self {
                    $(Self::$variant => $label,)+
                    Self::Other(label) => label,
                }
            }

            /// Whether the label was recognised
            #[must_use]
            pub const fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl From<String> for $name {
            fn from(label: String) -> Self {
                Self::from_label(&label)
            }
        }

        impl From<&str> for $name {
            fn from(label: &str) -> Self {
                Self::from_label(label)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(label) => label,
                    known => known.label().to_owned(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labeled_enum! {
    /// Terrain or surface condition under the ball at address
    ///
    /// Shares the "Above feet" / "Below feet" / "Level" labels with
    /// [`BallPosition`]. Only the lie feeds the adjustment table.
    pub enum Lie {
        /// Fairway
        Fairway => "Fairway",
        /// Rough
        Rough => "Rough",
        /// Sand or bunker
        SandBunker => "Sand / Bunker" | "Sand/Bunker" | "Bunker" | "Sand",
        /// Along a tree line
        TreeLine => "Tree line",
        /// Pine straw
        PineStraw => "Pine straw",
        /// Ball above the feet
        AboveFeet => "Above feet",
        /// Ball below the feet
        BelowFeet => "Below feet",
        /// Flat stance
        Level => "Level",
    }
}

labeled_enum! {
    /// Ball position relative to the player's feet
    pub enum BallPosition {
        /// Flat stance
        Level => "Level",
        /// Ball above the feet
        AboveFeet => "Above feet",
        /// Ball below the feet
        BelowFeet => "Below feet",
    }
}

labeled_enum! {
    /// Elevation change between ball and target
    pub enum Elevation {
        /// No elevation change
        Level => "Level",
        /// Target below the ball
        Downhill => "Downhill",
        /// Target above the ball
        Uphill => "Uphill",
    }
}

labeled_enum! {
    /// Wind direction relative to the target line
    pub enum WindDirection {
        /// Into the player's face
        Headwind => "Headwind",
        /// Behind the player
        Tailwind => "Tailwind",
        /// Crosswind blowing left to right
        LeftToRight => "Left→Right" | "Left->Right" | "Left to Right",
        /// Crosswind blowing right to left
        RightToLeft => "Right→Left" | "Right->Left" | "Right to Left",
        /// No wind
        NoWind => "None" | "Calm",
    }
}

/// Wind acting on the shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Direction relative to the target line
    pub direction: WindDirection,
    /// Speed in miles per hour
    #[serde(rename = "speed")]
    pub speed_mph: f64,
}

impl Wind {
    /// Create a wind value
    #[must_use]
    pub fn new(direction: impl Into<WindDirection>, speed_mph: f64) -> Self {
        Self {
            direction: direction.into(),
            speed_mph,
        }
    }

    /// No wind at all
    #[must_use]
    pub const fn calm() -> Self {
        Self {
            direction: WindDirection::NoWind,
            speed_mph: 0.0,
        }
    }
}

/// A shot scenario as described by the player
///
/// Built per request and never persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Distance to the target in yards
    pub distance: f64,
    /// Surface under the ball
    pub lie: Lie,
    /// Ball position relative to the feet
    #[serde(rename = "ball_pos")]
    pub ball_position: BallPosition,
    /// Elevation change; stored and passed through, never adjusts distance
    pub elevation: Elevation,
    /// Wind acting on the shot
    pub wind: Wind,
    /// Text description used for embedding and similarity lookup
    pub scenario_text: String,
}

impl Scenario {
    /// Create a scenario with a derived text description
    #[must_use]
    pub fn new(
        distance: f64,
        lie: impl Into<Lie>,
        ball_position: impl Into<BallPosition>,
        elevation: impl Into<Elevation>,
        wind: Wind,
    ) -> Self {
        let lie = lie.into();
        let ball_position = ball_position.into();
        let elevation = elevation.into();
        let scenario_text = Self::describe(distance, &lie, &ball_position, &elevation, &wind);
        Self {
            distance,
            lie,
            ball_position,
            elevation,
            wind,
            scenario_text,
        }
    }

    /// Replace the derived description with caller-supplied text
    #[must_use]
    pub fn with_scenario_text(mut self, text: impl Into<String>) -> Self {
        self.scenario_text = text.into();
        self
    }

    /// Render the canonical text description of a scenario
    ///
    /// Numbers always keep their decimal point: `150.0y`, `10.0mph`.
    #[must_use]
    pub fn describe(
        distance: f64,
        lie: &Lie,
        ball_position: &BallPosition,
        elevation: &Elevation,
        wind: &Wind,
    ) -> String {
        format!(
            "{distance:?}y, lie={lie}, ball_pos={ball_position}, wind={:?}mph {}, elev={elevation}",
            wind.speed_mph, wind.direction
        )
    }
}

/// A scenario together with its computed effective distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotPlan {
    /// The input scenario
    pub scenario: Scenario,
    /// Target distance after lie and wind corrections, in yards
    pub effective_distance: f64,
}

/// Result category of a shot relative to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotResult {
    /// Within tolerance of the target
    #[serde(rename = "perfect")]
    Perfect,
    /// Came up short of the target
    #[serde(rename = "too short")]
    TooShort,
    /// Flew past the target
    #[serde(rename = "too long")]
    TooLong,
}

impl ShotResult {
    /// Label used in prompts and stored rows
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Perfect => "perfect",
            Self::TooShort => "too short",
            Self::TooLong => "too long",
        }
    }
}

impl fmt::Display for ShotResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a shot missed its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissCause {
    /// Swing execution error; excluded from the learned history
    #[serde(rename = "Mis-hit")]
    MisHit,
    /// Wrong club chosen
    #[serde(rename = "Club selection")]
    ClubSelection,
    /// Wind read incorrectly
    #[serde(rename = "Wind mis-judge")]
    WindMisjudge,
    /// Anything else
    #[serde(rename = "Other")]
    Other,
}

impl MissCause {
    /// Every cause, in the order offered to the player
    pub const ALL: [Self; 4] = [
        Self::MisHit,
        Self::ClubSelection,
        Self::WindMisjudge,
        Self::Other,
    ];

    /// Label shown to the player and stored in rows
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::MisHit => "Mis-hit",
            Self::ClubSelection => "Club selection",
            Self::WindMisjudge => "Wind mis-judge",
            Self::Other => "Other",
        }
    }

    /// Parse a label from the closed set, case-insensitively
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        Self::ALL
            .into_iter()
            .find(|cause| cause.label().eq_ignore_ascii_case(trimmed))
    }
}

impl fmt::Display for MissCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classified outcome of a shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotOutcome {
    /// Carry distance in yards
    pub carried: f64,
    /// Carried minus target, signed
    pub error: f64,
    /// Result category
    pub result: ShotResult,
    /// Reason for the miss; always absent for a perfect shot
    pub cause: Option<MissCause>,
}

impl ShotOutcome {
    /// Whether a cause should be asked for
    #[must_use]
    pub fn needs_cause(&self) -> bool {
        self.result != ShotResult::Perfect
    }

    /// Attach a cause; ignored for perfect shots
    #[must_use]
    pub fn with_cause(mut self, cause: Option<MissCause>) -> Self {
        self.cause = if self.needs_cause() { cause } else { None };
        self
    }

    /// Whether the miss was a swing execution error
    #[must_use]
    pub fn is_mis_hit(&self) -> bool {
        self.cause == Some(MissCause::MisHit)
    }
}

/// A completed shot with the club that was recommended for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotRecord {
    /// Player identifier
    pub user_id: String,
    /// Scenario the shot was played from
    pub scenario: Scenario,
    /// Effective distance at the time of the recommendation
    pub effective_distance: f64,
    /// Club that was recommended
    pub recommended_club: String,
    /// What actually happened
    pub outcome: ShotOutcome,
}

impl ShotRecord {
    /// Whether this shot belongs in the learning corpus (mis-hits do not)
    #[must_use]
    pub fn is_representative(&self) -> bool {
        !self.outcome.is_mis_hit()
    }
}

/// Flattened storage row for a shot, including the scenario embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotRow {
    /// Player identifier
    pub user_id: String,
    /// Scenario description that was embedded
    pub scenario_text: String,
    /// Target distance in yards
    pub distance: f64,
    /// Lie label
    pub lie: Lie,
    /// Ball position label
    pub ball_pos: BallPosition,
    /// Wind direction label
    pub wind_dir: WindDirection,
    /// Wind speed in mph
    pub wind_speed: f64,
    /// Elevation label
    pub elevation: Elevation,
    /// Effective distance in yards
    pub effective_dist: f64,
    /// Recommended club
    pub recommended_club: String,
    /// Carry distance in yards
    pub carried: f64,
    /// Carried minus target
    pub error: f64,
    /// Result category
    pub result: ShotResult,
    /// Miss cause, if any
    pub cause: Option<MissCause>,
    /// Embedding of `scenario_text`
    pub embedding: Vec<f32>,
}

impl ShotRow {
    /// Flatten a record with its freshly computed embedding
    #[must_use]
    pub fn from_record(record: &ShotRecord, embedding: Vec<f32>) -> Self {
        let scenario = &record.scenario;
        Self {
            user_id: record.user_id.clone(),
            scenario_text: scenario.scenario_text.clone(),
            distance: scenario.distance,
            lie: scenario.lie.clone(),
            ball_pos: scenario.ball_position.clone(),
            wind_dir: scenario.wind.direction.clone(),
            wind_speed: scenario.wind.speed_mph,
            elevation: scenario.elevation.clone(),
            effective_dist: record.effective_distance,
            recommended_club: record.recommended_club.clone(),
            carried: record.outcome.carried,
            error: record.outcome.error,
            result: record.outcome.result,
            cause: record.outcome.cause,
            embedding,
        }
    }
}

/// A previously recorded shot returned by the similarity search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PastShot {
    /// Store row id, when the store reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Club that was recommended
    pub recommended_club: String,
    /// Carry distance in yards
    pub carried: f64,
    /// Result category
    pub result: ShotResult,
    /// Similarity score reported by the store, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl PastShot {
    /// Create a past shot without a similarity score
    #[must_use]
    pub fn new(recommended_club: impl Into<String>, carried: f64, result: ShotResult) -> Self {
        Self {
            id: None,
            recommended_club: recommended_club.into(),
            carried,
            result,
            similarity: None,
        }
    }
}

/// A player's average carry distance with one club
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubDistance {
    /// Player identifier
    pub user_id: String,
    /// Club name
    pub club: String,
    /// Average carry in yards
    pub distance: f64,
}

impl ClubDistance {
    /// Create a club distance entry
    #[must_use]
    pub fn new(user_id: impl Into<String>, club: impl Into<String>, distance: f64) -> Self {
        Self {
            user_id: user_id.into(),
            club: club.into(),
            distance,
        }
    }

    /// Upsert conflict key
    #[must_use]
    pub fn key(&self) -> (&str, &str) {
        (&self.user_id, &self.club)
    }
}
