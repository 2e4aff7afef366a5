// ABOUTME: Two-phase shot intake: question schema, answer validation, and club distance parsing
// ABOUTME: Shared by the HTTP routes and the interactive CLI so both validate input identically
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Shot Intake
//!
//! Gathering a shot happens in two phases. First the scenario questions are
//! rendered and answered, and [`submit_scenario`] turns the answers into a
//! [`Scenario`]. After the shot is played the outcome questions are asked; the
//! cause question only applies when the shot was not perfect.
//!
//! Presentation is left to the caller: the CLI renders questions as terminal
//! prompts, the HTTP service publishes them as JSON.

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::STANDARD_CLUBS;
use crate::errors::{AppError, AppResult};
use crate::models::{BallPosition, ClubDistance, Elevation, MissCause, Scenario, Wind, WindDirection};

/// Lie choices offered to the player
pub const LIE_CHOICES: [&str; 5] = ["Fairway", "Rough", "Sand / Bunker", "Tree line", "Pine straw"];

/// How a question is answered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Numeric answer with a lower bound
    Number {
        /// Lower bound on the answer
        min: f64,
        /// Whether `min` itself is refused
        #[serde(default)]
        exclusive: bool,
    },
    /// One of a fixed set of labels
    Choice {
        /// Labels in display order
        choices: Vec<String>,
    },
}

/// One question of the intake schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Answer field name
    pub key: String,
    /// Text shown to the player
    pub prompt: String,
    /// Expected answer shape
    pub kind: QuestionKind,
}

impl Question {
    fn number(key: &str, prompt: &str, min: f64) -> Self {
        Self {
            key: key.to_owned(),
            prompt: prompt.to_owned(),
            kind: QuestionKind::Number {
                min,
                exclusive: false,
            },
        }
    }

    fn positive(key: &str, prompt: &str) -> Self {
        Self {
            kind: QuestionKind::Number {
                min: 0.0,
                exclusive: true,
            },
            ..Self::number(key, prompt, 0.0)
        }
    }

    fn choice<'a>(key: &str, prompt: &str, choices: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            key: key.to_owned(),
            prompt: prompt.to_owned(),
            kind: QuestionKind::Choice {
                choices: choices.into_iter().map(str::to_owned).collect(),
            },
        }
    }

    /// Choice labels, empty for numeric questions
    #[must_use]
    pub fn choices(&self) -> &[String] {
        match &self.kind {
            QuestionKind::Choice { choices } => choices,
            QuestionKind::Number { .. } => &[],
        }
    }

    /// Whether a numeric answer satisfies the question's bound
    ///
    /// Choice questions accept no numbers.
    #[must_use]
    pub fn accepts(&self, value: f64) -> bool {
        match self.kind {
            QuestionKind::Number { min, exclusive } => {
                value.is_finite() && if exclusive { value > min } else { value >= min }
            }
            QuestionKind::Choice { .. } => false,
        }
    }
}

/// Scenario questions, in the order they are asked
#[must_use]
pub fn scenario_questions() -> Vec<Question> {
    vec![
        Question::positive("distance", "Distance to pin (yards)?"),
        Question::choice("lie", "Lie?", LIE_CHOICES),
        Question::choice("ball_pos", "Ball position?", BallPosition::LABELS.iter().copied()),
        Question::choice("elevation", "Elevation change?", Elevation::LABELS.iter().copied()),
        Question::choice("wind_dir", "Wind direction?", WindDirection::LABELS.iter().copied()),
        Question::number("wind_speed", "Wind speed (mph)?", 0.0),
    ]
}

/// Outcome questions asked after every shot
#[must_use]
pub fn outcome_questions() -> Vec<Question> {
    vec![Question::number("carried", "How far did it carry (yards)?", 0.0)]
}

/// Follow-up asked only when the shot was not perfect
#[must_use]
pub fn cause_question() -> Question {
    Question::choice(
        "cause",
        "What caused the miss?",
        MissCause::ALL.iter().map(MissCause::label),
    )
}

/// Every question, grouped by phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSchema {
    /// Asked before the recommendation
    pub scenario: Vec<Question>,
    /// Asked after the shot
    pub outcome: Vec<Question>,
    /// Asked after the shot when it was not perfect
    pub cause: Question,
}

/// The complete intake schema
#[must_use]
pub fn question_schema() -> QuestionSchema {
    QuestionSchema {
        scenario: scenario_questions(),
        outcome: outcome_questions(),
        cause: cause_question(),
    }
}

// ============================================================================
// Scenario Answers
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum LabelOrNumber {
    Label(String),
    Number(f64),
}

/// Accept a label or a bare number (older clients send elevation in feet)
fn label_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LabelOrNumber::deserialize(deserializer)? {
        LabelOrNumber::Label(label) => label,
        LabelOrNumber::Number(value) => value.to_string(),
    })
}

fn level() -> String {
    "Level".to_owned()
}

fn no_wind() -> String {
    "None".to_owned()
}

/// Answers to the scenario questions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAnswers {
    /// Distance to the pin in yards
    pub distance: f64,
    /// Lie label
    pub lie: String,
    /// Ball position label
    #[serde(default = "level", alias = "ball_position")]
    pub ball_pos: String,
    /// Elevation label
    #[serde(default = "level", deserialize_with = "label_or_number")]
    pub elevation: String,
    /// Wind direction label
    #[serde(default = "no_wind")]
    pub wind_dir: String,
    /// Wind speed in mph
    #[serde(default)]
    pub wind_speed: f64,
    /// Caller-supplied scenario description; derived when absent or blank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario_text: Option<String>,
}

/// Validate scenario answers and build the scenario
///
/// Unknown labels are kept verbatim; only the numeric fields can be rejected.
///
/// # Errors
///
/// Returns `InvalidInput` when the distance is not a positive finite number
/// or the wind speed is negative or not finite.
pub fn submit_scenario(answers: &ScenarioAnswers) -> AppResult<Scenario> {
    if !answers.distance.is_finite() || answers.distance <= 0.0 {
        return Err(AppError::invalid_input(format!(
            "distance must be a positive number of yards, got {}",
            answers.distance
        )));
    }
    if !answers.wind_speed.is_finite() || answers.wind_speed < 0.0 {
        return Err(AppError::invalid_input(format!(
            "wind_speed must be zero or more mph, got {}",
            answers.wind_speed
        )));
    }

    let scenario = Scenario::new(
        answers.distance,
        answers.lie.as_str(),
        answers.ball_pos.as_str(),
        answers.elevation.as_str(),
        Wind::new(answers.wind_dir.as_str(), answers.wind_speed),
    );

    Ok(match answers.scenario_text.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => scenario.with_scenario_text(text),
        _ => scenario,
    })
}

// ============================================================================
// Outcome Answers
// ============================================================================

/// Validate a carry distance
///
/// # Errors
///
/// Returns `InvalidInput` unless the carry is a finite number of yards, zero or more.
pub fn validate_carry(carried: f64) -> AppResult<f64> {
    if carried.is_finite() && carried >= 0.0 {
        Ok(carried)
    } else {
        Err(AppError::invalid_input(format!(
            "carried must be zero or more yards, got {carried}"
        )))
    }
}

/// Parse an optional cause label; blank means no cause
///
/// # Errors
///
/// Returns `InvalidInput` when the label is not one of the known causes.
pub fn parse_cause(label: Option<&str>) -> AppResult<Option<MissCause>> {
    match label.map(str::trim) {
        None | Some("") => Ok(None),
        Some(label) => MissCause::from_label(label).map(Some).ok_or_else(|| {
            AppError::invalid_input(format!(
                "unknown cause '{label}', expected one of: {}",
                MissCause::ALL.map(|cause| cause.label()).join(", ")
            ))
        }),
    }
}

// ============================================================================
// Club Distances
// ============================================================================

/// A club answer that could not be used
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedAnswer {
    /// Club the answer was for
    pub club: String,
    /// The raw answer
    pub answer: String,
}

/// Result of parsing one round of club distance answers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClubDistanceBatch {
    /// Entries ready to save
    pub entries: Vec<ClubDistance>,
    /// Clubs left blank
    pub skipped: Vec<String>,
    /// Answers that were not usable distances
    pub rejected: Vec<RejectedAnswer>,
}

/// Parse a distance answer; `None` when it is not a positive finite number
#[must_use]
pub fn parse_distance(answer: &str) -> Option<f64> {
    answer
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

/// Turn `(club, answer)` pairs into a batch; never fails
pub fn parse_club_distances<'a, I>(user_id: &str, answers: I) -> ClubDistanceBatch
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut batch = ClubDistanceBatch::default();
    for (club, answer) in answers {
        if answer.trim().is_empty() {
            batch.skipped.push(club.to_owned());
        } else if let Some(distance) = parse_distance(answer) {
            batch.entries.push(ClubDistance::new(user_id, club, distance));
        } else {
            batch.rejected.push(RejectedAnswer {
                club: club.to_owned(),
                answer: answer.to_owned(),
            });
        }
    }
    batch
}

/// Split club distances received over HTTP into savable and rejected entries
///
/// Entries failing [`validate_club_distance`] are reported, never fatal.
#[must_use]
pub fn screen_club_distances(entries: Vec<ClubDistance>) -> ClubDistanceBatch {
    let mut batch = ClubDistanceBatch::default();
    for entry in entries {
        if validate_club_distance(&entry).is_ok() {
            batch.entries.push(entry);
        } else {
            batch.rejected.push(RejectedAnswer {
                club: entry.club,
                answer: entry.distance.to_string(),
            });
        }
    }
    batch
}

/// Clubs asked about when collecting distances
#[must_use]
pub fn standard_clubs() -> &'static [&'static str] {
    STANDARD_CLUBS
}

/// Validate a club distance received over HTTP
///
/// # Errors
///
/// Returns `InvalidInput` for a blank user or club, or a distance that is not
/// a positive finite number.
pub fn validate_club_distance(entry: &ClubDistance) -> AppResult<()> {
    if entry.user_id.trim().is_empty() {
        return Err(AppError::missing_field("user_id"));
    }
    if entry.club.trim().is_empty() {
        return Err(AppError::missing_field("club"));
    }
    if !entry.distance.is_finite() || entry.distance <= 0.0 {
        return Err(AppError::invalid_input(format!(
            "distance for {} must be a positive number of yards",
            entry.club
        )));
    }
    Ok(())
}
