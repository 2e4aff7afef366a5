// ABOUTME: Recommendation prompt composition and stream collection
// ABOUTME: Builds the caddie prompt from a shot plan and drains generated text into a club call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recommendation Composer
//!
//! The prompt is two messages: a fixed caddie persona, then the effective
//! distance followed by one bullet per similar past shot (in retrieval order)
//! and a closing question.

use futures_util::StreamExt;

use crate::constants::recommendation::{CADDIE_PERSONA, CLOSING_QUESTION, NO_RECOMMENDATION};
use crate::errors::AppResult;
use crate::llm::{ChatMessage, ChatStream};
use crate::models::{PastShot, ShotPlan};

/// One bullet line describing a past shot
#[must_use]
pub fn describe_past_shot(shot: &PastShot) -> String {
    format!(
        "- You took {} and carried {}y ({}).",
        shot.recommended_club, shot.carried, shot.result
    )
}

/// User-message body for a plan and its similar shots
#[must_use]
pub fn compose_user_message(plan: &ShotPlan, past_shots: &[PastShot]) -> String {
    let mut body = format!(
        "Effective distance: {} y ({} base + adjustments).\n\nSimilar past shots:\n",
        plan.effective_distance, plan.scenario.distance
    );
    for shot in past_shots {
        body.push_str(&describe_past_shot(shot));
        body.push('\n');
    }
    body.push('\n');
    body.push_str(CLOSING_QUESTION);
    body
}

/// Full chat prompt: persona followed by the shot description
#[must_use]
pub fn build_prompt(plan: &ShotPlan, past_shots: &[PastShot]) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(CADDIE_PERSONA),
        ChatMessage::user(compose_user_message(plan, past_shots)),
    ]
}

/// Trim generated text, substituting the sentinel when nothing remains
#[must_use]
pub fn finalize_recommendation(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        NO_RECOMMENDATION.to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Drain a completion stream into the final recommendation text
///
/// # Errors
///
/// Returns the first error yielded by the stream; partial text is discarded.
pub async fn collect_recommendation(mut stream: ChatStream) -> AppResult<String> {
    let mut text = String::new();
    while let Some(chunk) = stream.next().await {
        text.push_str(&chunk?.delta);
    }
    Ok(finalize_recommendation(&text))
}
