// ABOUTME: Persistence gateway combining the embedding provider with the shot store
// ABOUTME: Skips mis-hit shots entirely and exposes similarity retrieval by scenario text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::database::ShotStore;
use crate::errors::AppResult;
use crate::llm::EmbeddingProvider;
use crate::models::{ClubDistance, PastShot, ShotRecord, ShotRow};

/// What happened to a shot handed to [`PersistenceGateway::insert_shot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotInsert {
    /// Mis-hit; nothing was embedded or written
    Skipped,
    /// Embedded and written to the store
    Stored,
}

impl ShotInsert {
    /// Whether a row was written
    #[must_use]
    pub const fn is_stored(&self) -> bool {
        matches!(self, Self::Stored)
    }
}

/// Storage-facing half of the caddie
#[derive(Clone)]
pub struct PersistenceGateway {
    store: Arc<dyn ShotStore>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl PersistenceGateway {
    /// Wire a store and an embedder together
    #[must_use]
    pub fn new(store: Arc<dyn ShotStore>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { store, embedder }
    }

    /// Backend description of the underlying store
    #[must_use]
    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Replace-on-conflict write of club distances; empty batches never reach the store
    ///
    /// A `(user_id, club)` pair repeated within one batch keeps only its last
    /// distance, since a single conflict upsert cannot touch a row twice.
    ///
    /// # Errors
    ///
    /// Returns the store's error, tagged with the failing collaborator.
    #[instrument(skip(self, entries), fields(entries = entries.len()))]
    pub async fn upsert_club_distances(&self, entries: &[ClubDistance]) -> AppResult<usize> {
        if entries.is_empty() {
            debug!("No club distances to save");
            return Ok(0);
        }
        let unique = last_entry_per_key(entries);
        if unique.len() < entries.len() {
            debug!(
                dropped = entries.len() - unique.len(),
                "Collapsed repeated club distances"
            );
        }
        self.store.upsert_club_distances(&unique).await
    }

    /// Embed and store a shot unless its cause is a mis-hit
    ///
    /// # Errors
    ///
    /// Returns the embedder's or store's error, tagged with the failing
    /// collaborator.
    #[instrument(skip(self, record), fields(user_id = %record.user_id, club = %record.recommended_club))]
    pub async fn insert_shot(&self, record: &ShotRecord) -> AppResult<ShotInsert> {
        if !record.is_representative() {
            info!("Mis-hit shot not stored");
            return Ok(ShotInsert::Skipped);
        }

        let embedding = self.embedder.embed(&record.scenario.scenario_text).await?;
        let row = ShotRow::from_record(record, embedding);
        self.store.insert_shot(&row).await?;
        Ok(ShotInsert::Stored)
    }

    /// Up to `match_count` stored shots whose scenarios resemble `scenario_text`
    ///
    /// # Errors
    ///
    /// Returns the embedder's or store's error, tagged with the failing
    /// collaborator.
    #[instrument(skip(self, scenario_text))]
    pub async fn find_similar_shots(
        &self,
        scenario_text: &str,
        match_count: usize,
    ) -> AppResult<Vec<PastShot>> {
        if match_count == 0 {
            return Ok(Vec::new());
        }
        let query_embedding = self.embedder.embed(scenario_text).await?;
        let mut shots = self.store.match_shots(&query_embedding, match_count).await?;
        shots.truncate(match_count);
        Ok(shots)
    }
}

/// Collapse repeated keys to their last distance, in first-seen order
fn last_entry_per_key(entries: &[ClubDistance]) -> Vec<ClubDistance> {
    let mut positions: HashMap<(&str, &str), usize> = HashMap::with_capacity(entries.len());
    let mut unique: Vec<ClubDistance> = Vec::with_capacity(entries.len());
    for entry in entries {
        match positions.get(&entry.key()) {
            Some(&index) => unique[index].distance = entry.distance,
            None => {
                positions.insert(entry.key(), unique.len());
                unique.push(entry.clone());
            }
        }
    }
    unique
}
