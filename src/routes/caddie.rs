// ABOUTME: Caddie HTTP handlers for club distances, recommendations, and shot outcomes
// ABOUTME: Validates input through the intake module and streams recommendations as plain text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Caddie Routes
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | GET | `/api/caddie/questions` | |
//! | POST | `/api/caddie/update-yardages` | `[{user_id, club, distance}]`; unusable entries are skipped |
//! | POST | `/api/caddie/recommend` | shot details |
//! | POST | `/api/caddie/record` | shot details, `recommended_club`, `carried`, `cause` |
//!
//! Shot details are the scenario answers flattened next to `user_id`.

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use futures_util::StreamExt;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, warn, Span};

use crate::constants::recommendation::NO_RECOMMENDATION;
use crate::errors::{AppError, AppResult};
use crate::intake::{
    parse_cause, question_schema, screen_club_distances, submit_scenario, validate_carry,
    ScenarioAnswers,
};
use crate::llm::ChatStream;
use crate::models::ClubDistance;
use crate::services::{CaddieService, RecordShot};

const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";

/// Body of `POST /api/caddie/recommend`
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendRequest {
    /// Player identifier
    #[serde(default)]
    pub user_id: String,
    /// Scenario answers
    #[serde(flatten)]
    pub answers: ScenarioAnswers,
}

/// Body of `POST /api/caddie/record`
#[derive(Debug, Clone, Deserialize)]
pub struct RecordRequest {
    /// Player identifier
    pub user_id: String,
    /// Scenario answers
    #[serde(flatten)]
    pub answers: ScenarioAnswers,
    /// Club that was recommended
    pub recommended_club: String,
    /// Carry distance in yards
    pub carried: f64,
    /// Miss cause label, ignored for perfect shots
    #[serde(default)]
    pub cause: Option<String>,
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::invalid_input(rejection.body_text()))
}

/// Turn generated chunks into body bytes, substituting the sentinel for an empty generation
fn text_body(mut chunks: ChatStream) -> Body {
    Body::from_stream(async_stream::stream! {
        let mut emitted = false;
        while let Some(item) = chunks.next().await {
            match item {
                Ok(chunk) => {
                    if !chunk.delta.is_empty() {
                        emitted = true;
                        yield Ok(Bytes::from(chunk.delta));
                    }
                    if chunk.is_final {
                        break;
                    }
                }
                Err(e) => {
                    error!("Recommendation stream failed: {e}");
                    yield Err(e);
                    return;
                }
            }
        }
        if !emitted {
            yield Ok::<Bytes, AppError>(Bytes::from_static(NO_RECOMMENDATION.as_bytes()));
        }
    })
}

/// Caddie routes handler
pub struct CaddieRoutes;

impl CaddieRoutes {
    /// Create all caddie routes
    pub fn routes(service: Arc<CaddieService>) -> Router {
        Router::new()
            .route("/api/caddie/questions", get(Self::questions))
            .route("/api/caddie/update-yardages", post(Self::update_yardages))
            .route("/api/caddie/recommend", post(Self::recommend))
            .route("/api/caddie/record", post(Self::record))
            .with_state(service)
    }

    async fn questions() -> impl IntoResponse {
        Json(question_schema())
    }

    async fn update_yardages(
        State(service): State<Arc<CaddieService>>,
        payload: Result<Json<Vec<ClubDistance>>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let batch = screen_club_distances(json_body(payload)?);
        if !batch.rejected.is_empty() {
            warn!(rejected = batch.rejected.len(), "Skipping unusable club distances");
        }

        let saved = service.update_club_distances(batch.entries).await?;
        Ok((
            StatusCode::OK,
            Json(json!({ "saved": saved, "rejected": batch.rejected })),
        )
            .into_response())
    }

    async fn recommend(
        State(service): State<Arc<CaddieService>>,
        payload: Result<Json<RecommendRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = json_body(payload)?;
        Span::current().record("user_id", request.user_id.as_str());

        let plan = service.plan(submit_scenario(&request.answers)?);
        let chunks = service.recommend_stream(&plan).await?;

        Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, TEXT_PLAIN_UTF8)],
            text_body(chunks),
        )
            .into_response())
    }

    async fn record(
        State(service): State<Arc<CaddieService>>,
        payload: Result<Json<RecordRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = json_body(payload)?;
        Span::current().record("user_id", request.user_id.as_str());

        if request.user_id.trim().is_empty() {
            return Err(AppError::missing_field("user_id"));
        }
        if request.recommended_club.trim().is_empty() {
            return Err(AppError::missing_field("recommended_club"));
        }

        let shot = RecordShot {
            user_id: request.user_id,
            scenario: submit_scenario(&request.answers)?,
            recommended_club: request.recommended_club,
            carried: validate_carry(request.carried)?,
            cause: parse_cause(request.cause.as_deref())?,
        };
        let recorded = service.record_outcome(shot).await?;

        Ok((
            StatusCode::OK,
            Json(json!({
                "success": true,
                "stored": recorded.insert.is_stored(),
                "outcome": recorded.outcome
            })),
        )
            .into_response())
    }
}
