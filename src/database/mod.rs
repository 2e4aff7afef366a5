// ABOUTME: Shot storage abstraction with Supabase and in-memory backends
// ABOUTME: Runtime backend selection from configuration, mirroring a database factory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Shot Storage
//!
//! The caddie persists two things: per-user club carry distances and recorded
//! shots with the embedding of their scenario text. Similarity search over
//! those embeddings is delegated to the store (`match_shots`).
//!
//! - [`SupabaseStore`] talks to a Supabase/`PostgREST` project over HTTP
//! - [`MemoryStore`] keeps everything in process for local runs and tests

mod memory;
mod supabase;

pub use memory::MemoryStore;
pub use supabase::{SupabaseConfig, SupabaseStore};

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::errors::AppError;
use crate::models::{ClubDistance, PastShot, ShotRow};

/// Storage backend contract
#[async_trait]
pub trait ShotStore: Send + Sync {
    /// Backend description for logs
    fn backend(&self) -> &'static str;

    /// Insert or replace carry distances keyed by `(user_id, club)`
    ///
    /// Returns the number of entries written.
    async fn upsert_club_distances(&self, entries: &[ClubDistance]) -> Result<usize, AppError>;

    /// Append one shot row
    async fn insert_shot(&self, row: &ShotRow) -> Result<(), AppError>;

    /// Up to `match_count` shots most similar to `query_embedding`, best first
    async fn match_shots(
        &self,
        query_embedding: &[f32],
        match_count: usize,
    ) -> Result<Vec<PastShot>, AppError>;
}

/// Which backend to run against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// Supabase project over `PostgREST`
    Supabase,
    /// In-process store
    Memory,
}

impl StoreKind {
    /// Configuration label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Supabase => "supabase",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "supabase" => Ok(Self::Supabase),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(AppError::config_invalid(
                "CADDIE_STORE",
                format!("unknown store '{other}' (expected supabase or memory)"),
            )),
        }
    }
}

/// Create the configured store
///
/// # Errors
///
/// Returns a configuration error when the Supabase backend is selected
/// without connection settings, or when its HTTP client cannot be built.
pub fn create_store(
    kind: StoreKind,
    supabase: Option<&SupabaseConfig>,
) -> Result<Arc<dyn ShotStore>, AppError> {
    let store: Arc<dyn ShotStore> = match kind {
        StoreKind::Supabase => {
            let config = supabase.ok_or_else(|| AppError::config_missing("SUPABASE_URL"))?;
            Arc::new(SupabaseStore::new(config.clone())?)
        }
        StoreKind::Memory => Arc::new(MemoryStore::new()),
    };
    info!(backend = store.backend(), "Shot store initialized");
    Ok(store)
}
