// ABOUTME: Supabase shot store speaking PostgREST over reqwest
// ABOUTME: Upserts club distances, inserts shot rows, and calls the match_shots procedure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument};

use super::ShotStore;
use crate::constants::{service_names, tables};
use crate::errors::AppError;
use crate::models::{ClubDistance, PastShot, ShotRow};
use crate::utils::http_client::{build_client, send_checked};

/// Connection settings for a Supabase project
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: String,
    /// Service-role key sent as `apikey` and bearer token
    pub service_role_key: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("service_role_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Serialize)]
struct MatchShotsParams<'a> {
    query_embedding: &'a [f32],
    match_count: usize,
}

/// `PostgREST` client for the caddie tables
pub struct SupabaseStore {
    client: Client,
    config: SupabaseConfig,
}

impl SupabaseStore {
    /// Create a store
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: SupabaseConfig) -> Result<Self, AppError> {
        let client = build_client(config.timeout)?;
        Ok(Self { client, config })
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1/{path}", self.config.url.trim_end_matches('/'))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(self.rest_url(path))
            .header("apikey", &self.config.service_role_key)
            .bearer_auth(&self.config.service_role_key)
    }
}

#[async_trait]
impl ShotStore for SupabaseStore {
    fn backend(&self) -> &'static str {
        "Supabase (PostgREST)"
    }

    #[instrument(skip(self, entries), fields(entries = entries.len()))]
    async fn upsert_club_distances(&self, entries: &[ClubDistance]) -> Result<usize, AppError> {
        if entries.is_empty() {
            return Ok(0);
        }

        let path = format!(
            "{}?on_conflict={}",
            tables::CLUB_DISTANCES,
            tables::CLUB_DISTANCES_CONFLICT_KEY
        );
        send_checked(
            service_names::SUPABASE,
            self.post(&path)
                .header("Prefer", "resolution=merge-duplicates,return=minimal")
                .json(entries),
        )
        .await?;

        debug!("Upserted club distances");
        Ok(entries.len())
    }

    #[instrument(skip(self, row), fields(user_id = %row.user_id))]
    async fn insert_shot(&self, row: &ShotRow) -> Result<(), AppError> {
        send_checked(
            service_names::SUPABASE,
            self.post(tables::SHOTS)
                .header("Prefer", "return=minimal")
                .json(row),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self, query_embedding), fields(dims = query_embedding.len()))]
    async fn match_shots(
        &self,
        query_embedding: &[f32],
        match_count: usize,
    ) -> Result<Vec<PastShot>, AppError> {
        let service = service_names::SUPABASE_MATCH_SHOTS;
        let path = format!("rpc/{}", tables::MATCH_SHOTS_RPC);
        let response = send_checked(
            service,
            self.post(&path).json(&MatchShotsParams {
                query_embedding,
                match_count,
            }),
        )
        .await?;

        let rows: Option<Vec<PastShot>> = response
            .json()
            .await
            .map_err(|e| AppError::external_service(service, format!("unreadable rows: {e}")))?;

        let mut rows = rows.unwrap_or_default();
        rows.truncate(match_count);
        debug!(matched = rows.len(), "Similar shots retrieved");
        Ok(rows)
    }
}
