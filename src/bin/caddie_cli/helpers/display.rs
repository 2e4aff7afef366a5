// ABOUTME: Output formatting helpers for caddie-cli
// ABOUTME: Renders saved distances, past shots, and outcomes as terminal tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use agent_caddie::{
    models::{ClubDistance, ShotPlan},
    services::{Recommendation, RecordedShot},
};
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, CellAlignment, ContentArrangement, Table};

fn table_with_header(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            header
                .iter()
                .map(|title| Cell::new(title).add_attribute(Attribute::Bold)),
        );
    table
}

fn yards(value: f64) -> Cell {
    Cell::new(format!("{value:.0}")).set_alignment(CellAlignment::Right)
}

/// Show the distances that were saved
pub fn display_saved_distances(entries: &[ClubDistance]) {
    let mut table = table_with_header(&["Club", "Carry (y)"]);
    for entry in entries {
        table.add_row(vec![Cell::new(&entry.club), yards(entry.distance)]);
    }
    println!("\nSaved {} club distances:", entries.len());
    println!("{table}");
}

/// Show how the conditions changed the distance
pub fn display_plan(plan: &ShotPlan) {
    println!(
        "\nPlays like {:.0} yards ({:.0} to the pin).",
        plan.effective_distance, plan.scenario.distance
    );
}

/// Print the club call and the shots it was based on
pub fn display_recommendation(recommendation: &Recommendation) {
    println!("\n→ I'd take your {}", recommendation.text);

    if recommendation.similar_shots.is_empty() {
        return;
    }
    let mut table = table_with_header(&["Club", "Carried (y)", "Result"]);
    for shot in &recommendation.similar_shots {
        table.add_row(vec![
            Cell::new(&shot.recommended_club),
            yards(shot.carried),
            Cell::new(&shot.result),
        ]);
    }
    println!("\nSimilar past shots:");
    println!("{table}");
}

/// Summarize a recorded outcome
pub fn display_recorded(recorded: &RecordedShot) {
    let outcome = &recorded.outcome;
    println!(
        "\nCarried {:.0}y, {:+.0}y from target: {}.",
        outcome.carried, outcome.error, outcome.result
    );
    if let Some(cause) = outcome.cause {
        println!("Cause: {cause}");
    }
    if recorded.insert.is_stored() {
        println!("Shot saved to your history.");
    } else {
        println!("Mis-hit; not added to your history.");
    }
}
