// ABOUTME: Caddie service orchestrating planning, retrieval, generation, and recording
// ABOUTME: All collaborators are injected at construction so the service runs against stubs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use futures_util::stream;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::gateway::{PersistenceGateway, ShotInsert};
use crate::analytics;
use crate::config::CaddieConfig;
use crate::constants::recommendation::DEFAULT_MATCH_COUNT;
use crate::database::create_store;
use crate::errors::AppResult;
use crate::llm::{
    ChatMessage, ChatRequest, ChatStream, EmbeddingProvider, LlmProvider, OpenAiProvider,
    StreamChunk,
};
use crate::logging::AppLogger;
use crate::models::{
    ClubDistance, MissCause, PastShot, Scenario, ShotOutcome, ShotPlan, ShotRecord,
};
use crate::recommendation::{build_prompt, collect_recommendation};

/// Tunables for the caddie service
#[derive(Debug, Clone)]
pub struct CaddieSettings {
    /// Chat model override; the provider default is used when absent
    pub model: Option<String>,
    /// Similar shots retrieved per recommendation
    pub match_count: usize,
}

impl Default for CaddieSettings {
    fn default() -> Self {
        Self {
            model: None,
            match_count: DEFAULT_MATCH_COUNT,
        }
    }
}

/// A drained recommendation with the context it was built from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Generated club call, or the no-recommendation sentinel
    pub text: String,
    /// Effective distance the prompt was built on
    pub effective_distance: f64,
    /// Past shots included in the prompt, in retrieval order
    pub similar_shots: Vec<PastShot>,
}

/// Everything needed to record a played shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordShot {
    /// Player identifier
    pub user_id: String,
    /// Scenario the shot was played from
    pub scenario: Scenario,
    /// Club that was recommended
    pub recommended_club: String,
    /// Carry distance in yards
    pub carried: f64,
    /// Reason for the miss, ignored for perfect shots
    #[serde(default)]
    pub cause: Option<MissCause>,
}

/// Result of recording a shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedShot {
    /// Classified outcome with the accepted cause
    pub outcome: ShotOutcome,
    /// Whether the shot joined the learning corpus
    pub insert: ShotInsert,
}

/// Club recommendation service
#[derive(Clone)]
pub struct CaddieService {
    llm: Arc<dyn LlmProvider>,
    gateway: PersistenceGateway,
    settings: CaddieSettings,
}

impl CaddieService {
    /// Assemble the service from its collaborators
    #[must_use]
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        gateway: PersistenceGateway,
        settings: CaddieSettings,
    ) -> Self {
        Self {
            llm,
            gateway,
            settings,
        }
    }

    /// Wire the `OpenAI` provider and the configured store
    ///
    /// One provider instance serves both chat and embeddings.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built or the store is
    /// missing its settings.
    pub fn from_config(config: &CaddieConfig) -> AppResult<Self> {
        let openai = Arc::new(OpenAiProvider::new(config.openai.clone())?);
        let llm: Arc<dyn LlmProvider> = openai.clone();
        let embedder: Arc<dyn EmbeddingProvider> = openai;

        let store = create_store(config.store, config.supabase.as_ref())?;
        Ok(Self::new(
            llm,
            PersistenceGateway::new(store, embedder),
            config.caddie_settings(),
        ))
    }

    /// The persistence gateway in use
    #[must_use]
    pub const fn gateway(&self) -> &PersistenceGateway {
        &self.gateway
    }

    /// Compute the effective distance for a scenario
    #[must_use]
    pub fn plan(&self, scenario: Scenario) -> ShotPlan {
        analytics::plan(scenario)
    }

    async fn similar_shots(&self, plan: &ShotPlan) -> AppResult<Vec<PastShot>> {
        self.gateway
            .find_similar_shots(&plan.scenario.scenario_text, self.settings.match_count)
            .await
    }

    fn chat_request(&self, messages: Vec<ChatMessage>) -> ChatRequest {
        let request = ChatRequest::new(messages);
        match &self.settings.model {
            Some(model) => request.with_model(model.clone()),
            None => request,
        }
    }

    /// Retrieve similar shots and compose the prompt
    ///
    /// # Errors
    ///
    /// Returns the embedder's or store's error.
    pub async fn prepare(&self, plan: &ShotPlan) -> AppResult<Vec<ChatMessage>> {
        let past_shots = self.similar_shots(plan).await?;
        Ok(build_prompt(plan, &past_shots))
    }

    async fn stream_messages(&self, messages: Vec<ChatMessage>) -> AppResult<ChatStream> {
        let request = self.chat_request(messages);
        if self.llm.capabilities().supports_streaming() {
            return self.llm.complete_stream(&request.with_streaming()).await;
        }

        debug!(provider = self.llm.name(), "Provider cannot stream; completing in one call");
        let response = self.llm.complete(&request).await?;
        let mut chunks: Vec<AppResult<StreamChunk>> = Vec::with_capacity(2);
        if !response.content.is_empty() {
            chunks.push(Ok(StreamChunk::text(response.content)));
        }
        chunks.push(Ok(StreamChunk::done()));
        Ok(Box::pin(stream::iter(chunks)))
    }

    /// Stream the recommendation text for a plan
    ///
    /// # Errors
    ///
    /// Returns a collaborator error raised before the first chunk; later
    /// failures surface as stream items.
    #[instrument(skip(self, plan), fields(effective_distance = plan.effective_distance))]
    pub async fn recommend_stream(&self, plan: &ShotPlan) -> AppResult<ChatStream> {
        let messages = self.prepare(plan).await?;
        self.stream_messages(messages).await
    }

    /// Produce a complete recommendation for a plan
    ///
    /// # Errors
    ///
    /// Returns any collaborator error; an empty generation is not an error.
    #[instrument(skip(self, plan), fields(effective_distance = plan.effective_distance))]
    pub async fn recommend(&self, plan: &ShotPlan) -> AppResult<Recommendation> {
        let similar_shots = self.similar_shots(plan).await?;
        let stream = self
            .stream_messages(build_prompt(plan, &similar_shots))
            .await?;
        let text = collect_recommendation(stream).await?;
        AppLogger::log_recommendation(plan.effective_distance, similar_shots.len(), &text);

        Ok(Recommendation {
            text,
            effective_distance: plan.effective_distance,
            similar_shots,
        })
    }

    /// Classify a played shot and store it unless it was a mis-hit
    ///
    /// The error is measured against the scenario's base distance.
    ///
    /// # Errors
    ///
    /// Returns the embedder's or store's error.
    #[instrument(skip(self, shot), fields(user_id = %shot.user_id, club = %shot.recommended_club))]
    pub async fn record_outcome(&self, shot: RecordShot) -> AppResult<RecordedShot> {
        let plan = self.plan(shot.scenario);
        let outcome =
            analytics::classify(plan.scenario.distance, shot.carried).with_cause(shot.cause);

        let record = ShotRecord {
            user_id: shot.user_id,
            scenario: plan.scenario,
            effective_distance: plan.effective_distance,
            recommended_club: shot.recommended_club,
            outcome,
        };
        let insert = self.gateway.insert_shot(&record).await?;
        AppLogger::log_shot_recorded(&record, insert.is_stored());

        Ok(RecordedShot {
            outcome: record.outcome,
            insert,
        })
    }

    /// Save a batch of club distances, returning how many were written
    ///
    /// # Errors
    ///
    /// Returns the store's error.
    pub async fn update_club_distances(&self, entries: Vec<ClubDistance>) -> AppResult<usize> {
        self.gateway.upsert_club_distances(&entries).await
    }
}
