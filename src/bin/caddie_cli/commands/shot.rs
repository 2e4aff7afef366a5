// ABOUTME: Shot command for caddie-cli
// ABOUTME: Runs the two-phase intake around a recommendation and records the outcome
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use agent_caddie::{
    analytics,
    errors::AppResult,
    intake::{
        cause_question, outcome_questions, scenario_questions, submit_scenario, validate_carry,
        ScenarioAnswers,
    },
    models::MissCause,
    services::{CaddieService, RecordShot},
};
use serde_json::{Map, Value};

use crate::helpers::{
    display::{display_plan, display_recommendation, display_recorded},
    prompt::{ask, ask_number},
};

/// Ask the scenario, recommend a club, then ask and record the outcome
pub async fn run(service: &CaddieService, user_id: &str) -> AppResult<()> {
    let mut answers = Map::new();
    for question in scenario_questions() {
        let answer = ask(&question)?;
        answers.insert(question.key, answer);
    }
    let answers: ScenarioAnswers = serde_json::from_value(Value::Object(answers))?;
    let plan = service.plan(submit_scenario(&answers)?);
    display_plan(&plan);

    let recommendation = service.recommend(&plan).await?;
    display_recommendation(&recommendation);

    let mut carried = 0.0;
    for question in outcome_questions() {
        carried = validate_carry(ask_number(&question)?)?;
    }

    let cause = if analytics::classify(plan.scenario.distance, carried).needs_cause() {
        ask(&cause_question())?.as_str().and_then(MissCause::from_label)
    } else {
        None
    };

    let recorded = service
        .record_outcome(RecordShot {
            user_id: user_id.to_owned(),
            scenario: plan.scenario,
            recommended_club: recommendation.text,
            carried,
            cause,
        })
        .await?;
    display_recorded(&recorded);
    Ok(())
}
