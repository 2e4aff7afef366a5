// ABOUTME: OpenAI-compatible chat completion and embedding client
// ABOUTME: Streams completions over SSE and maps upstream failures to tagged AppErrors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `OpenAI` Provider
//!
//! Talks to any endpoint implementing the `OpenAI` `chat/completions` and
//! `embeddings` APIs. Requests are never retried; the only protection is the
//! transport timeout configured on the HTTP client.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::sse_parser::create_sse_stream;
use super::{
    ChatMessage, ChatRequest, ChatResponse, ChatStream, EmbeddingProvider, LlmCapabilities,
    LlmProvider, StreamChunk, TokenUsage,
};
use crate::constants::service_names;
use crate::errors::AppError;
use crate::utils::http_client::{build_client, send_checked};

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

/// Default embedding model
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
    #[serde(default)]
    usage: Option<Usage>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

// ============================================================================
// Configuration
// ============================================================================

/// Connection settings for an OpenAI-compatible endpoint
#[derive(Clone)]
pub struct OpenAiConfig {
    /// API base URL, without a trailing `chat/completions`
    pub base_url: String,
    /// Bearer token
    pub api_key: String,
    /// Chat model used when a request names none
    pub chat_model: String,
    /// Embedding model
    pub embedding_model: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("chat_model", &self.chat_model)
            .field("embedding_model", &self.embedding_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OpenAiConfig {
    /// Settings for the public API with default models
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: api_key.into(),
            chat_model: DEFAULT_CHAT_MODEL.to_owned(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_owned(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Point at a different base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

// ============================================================================
// Provider
// ============================================================================

/// Chat and embedding client for an OpenAI-compatible API
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    /// Create a provider
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiConfig) -> Result<Self, AppError> {
        let client = build_client(config.timeout)?;
        Ok(Self { client, config })
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.config.api_key)
    }

    fn resolve_model<'a>(&'a self, request: &'a ChatRequest) -> &'a str {
        request.model.as_deref().unwrap_or(&self.config.chat_model)
    }

    async fn post_completion(
        &self,
        request: &ChatRequest,
        stream: bool,
    ) -> Result<reqwest::Response, AppError> {
        let body = CompletionRequest {
            model: self.resolve_model(request),
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream,
        };
        debug!(
            messages = request.messages.len(),
            stream, "Sending chat completion request"
        );

        send_checked(
            service_names::OPENAI_CHAT,
            self.authorized(self.client.post(self.api_url("chat/completions")))
                .json(&body),
        )
        .await
    }
}

/// Decode one streamed `data:` payload
fn parse_chunk(payload: &str) -> Option<Result<StreamChunk, AppError>> {
    match serde_json::from_str::<CompletionChunk>(payload) {
        Ok(chunk) => chunk.choices.into_iter().next().map(|choice| {
            Ok(StreamChunk {
                delta: choice.delta.content.unwrap_or_default(),
                is_final: choice.finish_reason.is_some(),
                finish_reason: choice.finish_reason,
            })
        }),
        Err(e) => {
            warn!("Skipping unparseable stream chunk: {e}");
            None
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::text_only() | LlmCapabilities::EMBEDDINGS
    }

    fn default_model(&self) -> &str {
        &self.config.chat_model
    }

    #[instrument(skip(self, request), fields(model = %self.resolve_model(request)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let response = self.post_completion(request, false).await?;
        let parsed: CompletionResponse = response.json().await.map_err(|e| {
            AppError::external_service(
                service_names::OPENAI_CHAT,
                format!("unreadable response: {e}"),
            )
        })?;

        let (content, finish_reason) = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| (choice.message.content.unwrap_or_default(), choice.finish_reason))
            .unwrap_or_default();

        Ok(ChatResponse {
            content,
            model: parsed
                .model
                .unwrap_or_else(|| self.resolve_model(request).to_owned()),
            usage: parsed.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason,
        })
    }

    #[instrument(skip(self, request), fields(model = %self.resolve_model(request)))]
    async fn complete_stream(&self, request: &ChatRequest) -> Result<ChatStream, AppError> {
        let response = self.post_completion(request, true).await?;
        Ok(create_sse_stream(
            response.bytes_stream(),
            parse_chunk,
            service_names::OPENAI_CHAT,
        ))
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiProvider {
    fn model(&self) -> &str {
        &self.config.embedding_model
    }

    #[instrument(skip(self, text), fields(model = %self.config.embedding_model, chars = text.len()))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AppError> {
        let service = service_names::OPENAI_EMBEDDINGS;
        let body = EmbeddingRequest {
            model: &self.config.embedding_model,
            input: text,
        };

        let response = send_checked(
            service,
            self.authorized(self.client.post(self.api_url("embeddings")))
                .json(&body),
        )
        .await?;

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| AppError::external_service(service, format!("unreadable response: {e}")))?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|data| data.embedding)
            .ok_or_else(|| AppError::external_service(service, "no embedding returned"))
    }
}
