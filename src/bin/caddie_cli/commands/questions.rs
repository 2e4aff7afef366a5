// ABOUTME: Questions command for caddie-cli
// ABOUTME: Prints the scenario, outcome, and cause questions as pretty JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use agent_caddie::{errors::AppResult, intake::question_schema};

/// Print the question schema
pub fn run() -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(&question_schema())?);
    Ok(())
}
