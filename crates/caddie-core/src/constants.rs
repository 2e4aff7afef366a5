// ABOUTME: Application constants for shot adjustments, outcome thresholds, and collaborators
// ABOUTME: Centralizes the adjustment table, club list, and external service names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Yardage adjustments applied for the lie under the ball
pub mod lie_adjustments {
    /// Ball above the feet plays longer
    pub const ABOVE_FEET_YARDS: f64 = 5.0;
    /// Ball below the feet plays shorter
    pub const BELOW_FEET_YARDS: f64 = -5.0;
    /// Rough grabs the club and kills carry
    pub const ROUGH_YARDS: f64 = 8.0;
    /// Sand or bunker lie
    pub const SAND_BUNKER_YARDS: f64 = 12.0;
}

/// Wind adjustment factors
pub mod wind {
    /// Yards of adjustment per mph of head/tail wind
    pub const YARDS_PER_MPH: f64 = 0.5;
}

/// Outcome classification thresholds
pub mod outcome {
    /// Largest absolute error (yards) still classified as perfect, inclusive
    pub const PERFECT_TOLERANCE_YARDS: f64 = 5.0;
}

/// Recommendation defaults
pub mod recommendation {
    /// Sentinel used when the text-generation service produced no content
    pub const NO_RECOMMENDATION: &str = "No recommendation";
    /// Number of similar past shots retrieved for a prompt
    pub const DEFAULT_MATCH_COUNT: usize = 3;
    /// Persona instruction sent as the system message
    pub const CADDIE_PERSONA: &str = "You're a golf caddie balancing conditions and history.";
    /// Closing question of the user message
    pub const CLOSING_QUESTION: &str = "Given this, what club would you suggest?";
}

/// Clubs offered when collecting carry distances
pub const STANDARD_CLUBS: &[&str] = &[
    "Driver",
    "3-Wood",
    "5-Wood",
    "3-Iron",
    "4-Iron",
    "5-Iron",
    "6-Iron",
    "7-Iron",
    "8-Iron",
    "9-Iron",
    "Pitching Wedge",
    "Sand Wedge",
    "48°",
    "50°",
    "52°",
    "54°",
    "56°",
    "58°",
    "60°",
];

/// Names used to tag collaborator failures and log lines
pub mod service_names {
    /// This service
    pub const AGENT_CADDIE: &str = "agent-caddie";
    /// Text-generation collaborator
    pub const OPENAI_CHAT: &str = "openai-chat";
    /// Embedding collaborator
    pub const OPENAI_EMBEDDINGS: &str = "openai-embeddings";
    /// Persistence collaborator (table writes)
    pub const SUPABASE: &str = "supabase";
    /// Similarity search procedure
    pub const SUPABASE_MATCH_SHOTS: &str = "supabase-match-shots";
    /// In-process store used for local runs
    pub const MEMORY_STORE: &str = "memory-store";
}

/// Data store table and procedure names
pub mod tables {
    /// Per-user average carry distances
    pub const CLUB_DISTANCES: &str = "club_distances";
    /// Recorded shots with scenario embeddings
    pub const SHOTS: &str = "shots";
    /// Similarity search stored procedure
    pub const MATCH_SHOTS_RPC: &str = "match_shots";
    /// Upsert conflict key for club distances
    pub const CLUB_DISTANCES_CONFLICT_KEY: &str = "user_id,club";
}
