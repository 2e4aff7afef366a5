// ABOUTME: HTTP tests for the caddie router driven in-process with tower oneshot
// ABOUTME: Covers the banner, health, questions, yardage upsert, streamed recommendation, and recording
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use agent_caddie::errors::AppError;
use agent_caddie::models::{ClubDistance, PastShot, ShotResult};
use agent_caddie::routes::app_router;
use axum::{http::StatusCode, Router};
use common::{test_caddie, CountingStore, StubEmbedder, StubLlm, TestCaddie};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};
use std::sync::Arc;

fn router(caddie: &TestCaddie) -> Router {
    app_router(
        Arc::new(caddie.service.clone()),
        &["http://localhost:8000".to_owned()],
    )
}

fn default_caddie() -> TestCaddie {
    test_caddie(
        StubLlm::streaming(["Take ", "the 6-Iron"]),
        StubEmbedder::default(),
        CountingStore::new(),
    )
}

fn shot_details() -> Value {
    json!({
        "user_id": "player-1",
        "distance": 150,
        "lie": "Rough",
        "ball_pos": "Level",
        "elevation": 0,
        "wind_dir": "Headwind",
        "wind_speed": 10
    })
}

#[tokio::test]
async fn test_banner_and_health() {
    let caddie = default_caddie();

    let banner: Value = AxumTestRequest::get("/")
        .send(router(&caddie))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(banner["message"], "Agent Caddie API is running");

    let health: Value = AxumTestRequest::get("/health")
        .send(router(&caddie))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(health["status"], "healthy");
    assert!(health["timestamp"].is_string());
}

#[tokio::test]
async fn test_questions_schema() {
    let schema: Value = AxumTestRequest::get("/api/caddie/questions")
        .send(router(&default_caddie()))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(schema["scenario"].as_array().unwrap().len(), 6);
    assert_eq!(schema["cause"]["key"], "cause");
}

#[tokio::test]
async fn test_update_yardages_saves_batch() {
    let caddie = default_caddie();

    let body: Value = AxumTestRequest::post("/api/caddie/update-yardages")
        .json(&json!([
            {"user_id": "player-1", "club": "Driver", "distance": 250},
            {"user_id": "player-1", "club": "7-Iron", "distance": 150}
        ]))
        .send(router(&caddie))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body, json!({"saved": 2, "rejected": []}));
    assert_eq!(caddie.store.inner().club_distances("player-1").await.len(), 2);
}

#[tokio::test]
async fn test_update_yardages_skips_unusable_entries() {
    let caddie = default_caddie();

    let body: Value = AxumTestRequest::post("/api/caddie/update-yardages")
        .json(&json!([
            {"user_id": "player-1", "club": "Driver", "distance": 250},
            {"user_id": "player-1", "club": "7-Iron", "distance": 0},
            {"user_id": "player-1", "club": "9-Iron", "distance": -5}
        ]))
        .send(router(&caddie))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["saved"], 1);
    let rejected: Vec<&str> = body["rejected"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["club"].as_str().unwrap())
        .collect();
    assert_eq!(rejected, vec!["7-Iron", "9-Iron"]);

    let saved = caddie.store.inner().club_distances("player-1").await;
    assert_eq!(saved, vec![ClubDistance::new("player-1", "Driver", 250.0)]);
}

#[tokio::test]
async fn test_update_yardages_all_rejected_never_reaches_store() {
    let caddie = default_caddie();

    let body: Value = AxumTestRequest::post("/api/caddie/update-yardages")
        .json(&json!([{"user_id": "player-1", "club": "Driver", "distance": -5}]))
        .send(router(&caddie))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["saved"], 0);
    assert_eq!(caddie.store.calls(), (0, 0, 0));
}

#[tokio::test]
async fn test_recommend_streams_plain_text() {
    let caddie = test_caddie(
        StubLlm::streaming(["Take ", "the 6-Iron"]),
        StubEmbedder::default(),
        CountingStore::with_matches(vec![PastShot::new("6-Iron", 160.0, ShotResult::Perfect)]),
    );

    let response = AxumTestRequest::post("/api/caddie/recommend")
        .json(&shot_details())
        .send(router(&caddie))
        .await
        .assert_status(StatusCode::OK);

    assert_eq!(
        response.header("content-type"),
        Some("text/plain; charset=utf-8")
    );
    assert_eq!(response.text(), "Take the 6-Iron");
    assert!(caddie.llm.requests()[0].messages[1]
        .content
        .contains("Effective distance: 163 y"));
}

#[tokio::test]
async fn test_recommend_empty_generation_sends_sentinel() {
    let caddie = test_caddie(
        StubLlm::streaming(Vec::<String>::new()),
        StubEmbedder::default(),
        CountingStore::new(),
    );

    let text = AxumTestRequest::post("/api/caddie/recommend")
        .json(&shot_details())
        .send(router(&caddie))
        .await
        .assert_status(StatusCode::OK)
        .text();

    assert_eq!(text, "No recommendation");
}

#[tokio::test]
async fn test_recommend_collaborator_failure_is_bad_gateway() {
    let caddie = test_caddie(
        StubLlm::failing(AppError::external_service("openai-chat", "HTTP 500")),
        StubEmbedder::default(),
        CountingStore::new(),
    );

    let body: Value = AxumTestRequest::post("/api/caddie/recommend")
        .json(&shot_details())
        .send(router(&caddie))
        .await
        .assert_status(StatusCode::BAD_GATEWAY)
        .json();

    assert_eq!(body["error"]["service"], "openai-chat");
}

#[tokio::test]
async fn test_recommend_rejects_invalid_distance() {
    let mut details = shot_details();
    details["distance"] = json!(0);

    AxumTestRequest::post("/api/caddie/recommend")
        .json(&details)
        .send(router(&default_caddie()))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let body: Value = AxumTestRequest::post("/api/caddie/recommend")
        .raw_json("{\"distance\": ")
        .send(router(&default_caddie()))
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();

    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_record_stores_shot() {
    let caddie = default_caddie();
    let mut details = shot_details();
    details["recommended_club"] = json!("6-Iron");
    details["carried"] = json!(140);
    details["cause"] = json!("Club selection");

    let body: Value = AxumTestRequest::post("/api/caddie/record")
        .json(&details)
        .send(router(&caddie))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["success"], true);
    assert_eq!(body["stored"], true);
    assert_eq!(body["outcome"]["result"], "too short");
    assert_eq!(body["outcome"]["cause"], "Club selection");
    assert_eq!(caddie.store.inner().shots().await.len(), 1);
}

#[tokio::test]
async fn test_record_mis_hit_is_not_stored() {
    let caddie = default_caddie();
    let mut details = shot_details();
    details["recommended_club"] = json!("6-Iron");
    details["carried"] = json!(90);
    details["cause"] = json!("Mis-hit");

    let body: Value = AxumTestRequest::post("/api/caddie/record")
        .json(&details)
        .send(router(&caddie))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["success"], true);
    assert_eq!(body["stored"], false);
    assert_eq!(caddie.embedder.calls(), 0);
}

#[tokio::test]
async fn test_record_rejects_unknown_cause() {
    let mut details = shot_details();
    details["recommended_club"] = json!("6-Iron");
    details["carried"] = json!(140);
    details["cause"] = json!("Bad luck");

    AxumTestRequest::post("/api/caddie/record")
        .json(&details)
        .send(router(&default_caddie()))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
