// ABOUTME: In-process shot store for local runs and tests
// ABOUTME: Ranks stored shots by cosine similarity of their scenario embeddings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::ShotStore;
use crate::errors::AppError;
use crate::models::{ClubDistance, PastShot, ShotRow};

#[derive(Default)]
struct Tables {
    club_distances: BTreeMap<(String, String), f64>,
    shots: Vec<ShotRow>,
}

/// Store holding club distances and shots in memory
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Club distances for one user, ordered by club name
    pub async fn club_distances(&self, user_id: &str) -> Vec<ClubDistance> {
        self.tables
            .read()
            .await
            .club_distances
            .iter()
            .filter(|((user, _), _)| user == user_id)
            .map(|((user, club), distance)| ClubDistance::new(user, club, *distance))
            .collect()
    }

    /// Every stored shot row, in insertion order
    pub async fn shots(&self) -> Vec<ShotRow> {
        self.tables.read().await.shots.clone()
    }
}

/// Cosine similarity; zero when either vector has no magnitude or lengths differ
fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let (dot, norm_a, norm_b) = a.iter().zip(b).fold((0.0, 0.0, 0.0), |acc, (x, y)| {
        let (x, y) = (f64::from(*x), f64::from(*y));
        (acc.0 + x * y, acc.1 + x * x, acc.2 + y * y)
    });
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a.sqrt() * norm_b.sqrt())
    }
}

#[async_trait]
impl ShotStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "In-memory"
    }

    async fn upsert_club_distances(&self, entries: &[ClubDistance]) -> Result<usize, AppError> {
        let mut tables = self.tables.write().await;
        for entry in entries {
            tables
                .club_distances
                .insert((entry.user_id.clone(), entry.club.clone()), entry.distance);
        }
        Ok(entries.len())
    }

    async fn insert_shot(&self, row: &ShotRow) -> Result<(), AppError> {
        self.tables.write().await.shots.push(row.clone());
        Ok(())
    }

    async fn match_shots(
        &self,
        query_embedding: &[f32],
        match_count: usize,
    ) -> Result<Vec<PastShot>, AppError> {
        let tables = self.tables.read().await;
        let mut scored: Vec<(f64, usize, &ShotRow)> = tables
            .shots
            .iter()
            .enumerate()
            .map(|(index, row)| (cosine_similarity(query_embedding, &row.embedding), index, row))
            .collect();
        // Stable sort keeps insertion order among equal scores
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(match_count)
            .map(|(similarity, index, row)| PastShot {
                id: i64::try_from(index + 1).ok(),
                recommended_club: row.recommended_club.clone(),
                carried: row.carried,
                result: row.result,
                similarity: Some(similarity),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_bounds() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-9);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-9);
        assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).abs() < f64::EPSILON);
        assert!(cosine_similarity(&[1.0], &[1.0, 0.0]).abs() < f64::EPSILON);
    }
}
