// ABOUTME: Shared test utilities for caddie integration tests
// ABOUTME: In-process stub chat, embedding, and store collaborators that record their calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `agent_caddie`
//!
//! Every stub counts its calls so tests can assert that a collaborator was
//! never reached.

use agent_caddie::{
    database::{MemoryStore, ShotStore},
    errors::{AppError, AppResult},
    llm::{
        ChatRequest, ChatResponse, ChatStream, EmbeddingProvider, LlmCapabilities, LlmProvider,
        StreamChunk,
    },
    models::{ClubDistance, PastShot, Scenario, ShotRow, Wind},
    services::{CaddieService, CaddieSettings, PersistenceGateway},
};
use async_trait::async_trait;
use futures_util::stream;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex, Once,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// The worked example: 150 y from the rough into a 10 mph headwind
pub fn rough_headwind_scenario() -> Scenario {
    Scenario::new(150.0, "Rough", "Level", "Level", Wind::new("Headwind", 10.0))
}

// ============================================================================
// Chat stub
// ============================================================================

/// Chat provider replaying scripted chunks
pub struct StubLlm {
    chunks: Vec<String>,
    streaming: bool,
    failure: Option<AppError>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl StubLlm {
    /// Streaming provider emitting `chunks` in order
    pub fn streaming<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            chunks: chunks.into_iter().map(Into::into).collect(),
            streaming: true,
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Provider without streaming support answering `content` in one call
    pub fn non_streaming(content: &str) -> Self {
        Self {
            streaming: false,
            ..Self::streaming([content])
        }
    }

    /// Provider whose every call fails with `error`
    pub fn failing(error: AppError) -> Self {
        Self {
            failure: Some(error),
            ..Self::streaming(Vec::<String>::new())
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: &ChatRequest) -> AppResult<()> {
        self.requests.lock().unwrap().push(request.clone());
        let Some(error) = &self.failure else {
            return Ok(());
        };
        let copy = AppError::new(error.code, error.message.clone());
        Err(match &error.context.service {
            Some(service) => copy.with_service(service.clone()),
            None => copy,
        })
    }
}

#[async_trait]
impl LlmProvider for StubLlm {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn capabilities(&self) -> LlmCapabilities {
        if self.streaming {
            LlmCapabilities::text_only()
        } else {
            LlmCapabilities::SYSTEM_MESSAGES
        }
    }

    fn default_model(&self) -> &str {
        "stub-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.record(request)?;
        Ok(ChatResponse {
            content: self.chunks.concat(),
            model: "stub-model".to_owned(),
            usage: None,
            finish_reason: Some("stop".to_owned()),
        })
    }

    async fn complete_stream(&self, request: &ChatRequest) -> Result<ChatStream, AppError> {
        self.record(request)?;
        let mut items: Vec<AppResult<StreamChunk>> = self
            .chunks
            .iter()
            .map(|chunk| Ok(StreamChunk::text(chunk.clone())))
            .collect();
        items.push(Ok(StreamChunk::done()));
        Ok(Box::pin(stream::iter(items)))
    }
}

// ============================================================================
// Embedding stub
// ============================================================================

/// Embedder returning a fixed vector and counting calls
pub struct StubEmbedder {
    vector: Vec<f32>,
    fail: bool,
    calls: AtomicUsize,
    texts: Mutex<Vec<String>>,
}

impl StubEmbedder {
    /// Embedder that always returns `vector`
    pub fn new(vector: Vec<f32>) -> Self {
        Self {
            vector,
            fail: false,
            calls: AtomicUsize::new(0),
            texts: Mutex::new(Vec::new()),
        }
    }

    /// Embedder whose every call fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    /// Number of `embed` calls
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Texts embedded so far
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

impl Default for StubEmbedder {
    fn default() -> Self {
        Self::new(vec![1.0, 0.0, 0.0])
    }
}

#[async_trait]
impl EmbeddingProvider for StubEmbedder {
    fn model(&self) -> &str {
        "stub-embedding"
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.texts.lock().unwrap().push(text.to_owned());
        if self.fail {
            return Err(AppError::external_service(
                "openai-embeddings",
                "embedding backend down",
            ));
        }
        Ok(self.vector.clone())
    }
}

// ============================================================================
// Store stub
// ============================================================================

/// Memory store wrapper counting every call, optionally with canned matches
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    canned_matches: Option<Vec<PastShot>>,
    upserts: AtomicUsize,
    inserts: AtomicUsize,
    matches: AtomicUsize,
}

impl CountingStore {
    /// Store backed by an empty memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose `match_shots` returns `shots` verbatim
    pub fn with_matches(shots: Vec<PastShot>) -> Self {
        Self {
            canned_matches: Some(shots),
            ..Self::default()
        }
    }

    /// The wrapped memory store
    pub const fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    /// `(upserts, inserts, matches)` call counts
    pub fn calls(&self) -> (usize, usize, usize) {
        (
            self.upserts.load(Ordering::SeqCst),
            self.inserts.load(Ordering::SeqCst),
            self.matches.load(Ordering::SeqCst),
        )
    }
}

#[async_trait]
impl ShotStore for CountingStore {
    fn backend(&self) -> &'static str {
        "counting"
    }

    async fn upsert_club_distances(&self, entries: &[ClubDistance]) -> Result<usize, AppError> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        self.inner.upsert_club_distances(entries).await
    }

    async fn insert_shot(&self, row: &ShotRow) -> Result<(), AppError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert_shot(row).await
    }

    async fn match_shots(
        &self,
        query_embedding: &[f32],
        match_count: usize,
    ) -> Result<Vec<PastShot>, AppError> {
        self.matches.fetch_add(1, Ordering::SeqCst);
        match &self.canned_matches {
            Some(shots) => Ok(shots.clone()),
            None => self.inner.match_shots(query_embedding, match_count).await,
        }
    }
}

// ============================================================================
// Assembled fixtures
// ============================================================================

/// A service and handles on each of its stub collaborators
pub struct TestCaddie {
    pub service: CaddieService,
    pub llm: Arc<StubLlm>,
    pub embedder: Arc<StubEmbedder>,
    pub store: Arc<CountingStore>,
}

/// Wire a service from stubs with default settings
pub fn test_caddie(llm: StubLlm, embedder: StubEmbedder, store: CountingStore) -> TestCaddie {
    init_test_logging();
    let llm = Arc::new(llm);
    let embedder = Arc::new(embedder);
    let store = Arc::new(store);
    let gateway = PersistenceGateway::new(store.clone(), embedder.clone());
    let service = CaddieService::new(llm.clone(), gateway, CaddieSettings::default());
    TestCaddie {
        service,
        llm,
        embedder,
        store,
    }
}
