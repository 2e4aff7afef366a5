// ABOUTME: Terminal prompts for caddie-cli built on dialoguer
// ABOUTME: Renders intake questions as numeric inputs or selection menus
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use agent_caddie::{
    errors::{AppError, AppResult},
    intake::{Question, QuestionKind},
};
use dialoguer::{Input, Select};
use serde_json::Value;

fn prompt_error(e: &dialoguer::Error) -> AppError {
    AppError::internal(format!("Terminal prompt failed: {e}"))
}

/// Ask a numeric question, re-prompting until the bound is met
pub fn ask_number(question: &Question) -> AppResult<f64> {
    let hint = match question.kind {
        QuestionKind::Number {
            min,
            exclusive: true,
        } => format!("Enter a number greater than {min}"),
        QuestionKind::Number { min, .. } => format!("Enter a number of at least {min}"),
        QuestionKind::Choice { .. } => "Pick one of the listed options".to_owned(),
    };
    Input::<f64>::new()
        .with_prompt(&question.prompt)
        .validate_with(move |value: &f64| -> Result<(), String> {
            if question.accepts(*value) {
                Ok(())
            } else {
                Err(hint.clone())
            }
        })
        .interact_text()
        .map_err(|e| prompt_error(&e))
}

/// Ask any intake question and return the answer as JSON
pub fn ask(question: &Question) -> AppResult<Value> {
    match &question.kind {
        QuestionKind::Number { .. } => ask_number(question).map(Value::from),
        QuestionKind::Choice { choices } => {
            let index = Select::new()
                .with_prompt(&question.prompt)
                .items(choices.as_slice())
                .default(0)
                .interact()
                .map_err(|e| prompt_error(&e))?;
            Ok(Value::from(choices[index].clone()))
        }
    }
}

/// Free-text answer that may be left blank
pub fn ask_optional(prompt: &str) -> AppResult<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| prompt_error(&e))
}
