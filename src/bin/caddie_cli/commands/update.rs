// ABOUTME: Update command for caddie-cli
// ABOUTME: Prompts for every standard club's carry and saves the usable answers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use agent_caddie::{
    errors::AppResult,
    intake::{parse_club_distances, standard_clubs},
    services::CaddieService,
};
use tracing::info;

use crate::helpers::{display::display_saved_distances, prompt::ask_optional};

/// Ask for each club's distance, then save everything that parsed
pub async fn run(service: &CaddieService, user_id: &str) -> AppResult<()> {
    println!("Enter your carry distance for each club (leave blank to skip).");

    let mut answers = Vec::with_capacity(standard_clubs().len());
    for club in standard_clubs() {
        answers.push((*club, ask_optional(&format!("{club} distance (yards)"))?));
    }

    let batch = parse_club_distances(
        user_id,
        answers.iter().map(|(club, answer)| (*club, answer.as_str())),
    );
    for rejected in &batch.rejected {
        println!(
            "Skipping {}: '{}' is not a distance in yards",
            rejected.club, rejected.answer
        );
    }

    if batch.entries.is_empty() {
        println!("No distances entered; nothing saved.");
        return Ok(());
    }

    let saved = service.update_club_distances(batch.entries.clone()).await?;
    info!(user_id, saved, skipped = batch.skipped.len(), "Club distances saved");
    display_saved_distances(&batch.entries);
    Ok(())
}
