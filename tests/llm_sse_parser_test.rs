// ABOUTME: Integration tests for the SSE parser behind streamed recommendations
// ABOUTME: Validates multi-event chunks, split payloads, termination, and transport errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use agent_caddie::errors::AppError;
use agent_caddie::llm::sse_parser::{create_sse_stream, SseEvent, SseLineBuffer};
use agent_caddie::llm::StreamChunk;
use bytes::Bytes;
use futures_util::{stream, StreamExt};

/// Test decoder for `{"club": "...", "done": bool}` payloads
fn parse_club(payload: &str) -> Option<Result<StreamChunk, AppError>> {
    let value: serde_json::Value = serde_json::from_str(payload).ok()?;
    let club = value.get("club")?.as_str()?.to_owned();
    let done = value
        .get("done")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);
    Some(Ok(StreamChunk {
        delta: club,
        is_final: done,
        finish_reason: done.then(|| "stop".to_owned()),
    }))
}

async fn collect(chunks: Vec<&'static str>) -> Vec<StreamChunk> {
    let bytes = stream::iter(
        chunks
            .into_iter()
            .map(|chunk| Ok::<Bytes, reqwest::Error>(Bytes::from_static(chunk.as_bytes()))),
    );
    let mut sse = create_sse_stream(bytes, parse_club, "test-service");

    let mut results = Vec::new();
    while let Some(item) = sse.next().await {
        results.push(item.expect("unexpected stream error"));
    }
    results
}

fn deltas(chunks: &[StreamChunk]) -> String {
    chunks.iter().map(|c| c.delta.as_str()).collect()
}

#[tokio::test]
async fn test_events_split_across_network_chunks() {
    let chunks = collect(vec![
        "data: {\"club\":\"7-\"}\n\ndata: {\"cl",
        "ub\":\"Iron\"}\n\n",
        "data: [DONE]\n\n",
    ])
    .await;

    assert_eq!(deltas(&chunks), "7-Iron");
    assert!(chunks.last().unwrap().is_final);
}

#[tokio::test]
async fn test_stops_at_done_marker() {
    let chunks = collect(vec![
        "data: {\"club\":\"Driver\"}\n\ndata: [DONE]\n\ndata: {\"club\":\"ignored\"}\n\n",
    ])
    .await;

    assert_eq!(deltas(&chunks), "Driver");
    assert_eq!(chunks.len(), 2);
}

#[tokio::test]
async fn test_stream_ends_without_done_marker() {
    let chunks = collect(vec!["data: {\"club\":\"Wedge\"}\n\n"]).await;
    assert_eq!(deltas(&chunks), "Wedge");
    assert!(!chunks.last().unwrap().is_final);
}

#[tokio::test]
async fn test_trailing_line_without_newline_is_flushed() {
    let chunks = collect(vec!["data: {\"club\":\"Putter\"}"]).await;
    assert_eq!(deltas(&chunks), "Putter");
}

#[tokio::test]
async fn test_empty_deltas_and_garbage_are_dropped() {
    let chunks = collect(vec![
        "data: {\"club\":\"\"}\n",
        "data: not json\n",
        ": keep-alive\n",
        "data: {\"club\":\"9-Iron\"}\r\n",
        "data: {\"club\":\"\",\"done\":true}\n",
    ])
    .await;

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].delta, "9-Iron");
    assert!(chunks[1].is_final);
}

#[test]
fn test_line_buffer_multiple_events_one_chunk() {
    let mut buffer = SseLineBuffer::new();
    let events = buffer.feed(b"data: a\n\ndata: b\n\ndata: [DONE]\n\n");
    assert_eq!(
        events,
        vec![
            SseEvent::Data("a".to_owned()),
            SseEvent::Data("b".to_owned()),
            SseEvent::Done,
        ]
    );
}

#[test]
fn test_line_buffer_byte_at_a_time() {
    let mut buffer = SseLineBuffer::new();
    let mut events = Vec::new();
    for byte in b"data: {\"club\":\"6-Iron\"}\n" {
        events.extend(buffer.feed(&[*byte]));
    }
    assert_eq!(events, vec![SseEvent::Data("{\"club\":\"6-Iron\"}".to_owned())]);
    assert!(buffer.flush().is_empty());
}

#[test]
fn test_line_buffer_byte_at_a_time_keeps_multibyte_labels() {
    let mut buffer = SseLineBuffer::new();
    let mut events = Vec::new();
    for byte in "data: {\"club\":\"60° wedge, Left→Right\"}\n".as_bytes() {
        events.extend(buffer.feed(&[*byte]));
    }
    assert_eq!(
        events,
        vec![SseEvent::Data("{\"club\":\"60° wedge, Left→Right\"}".to_owned())]
    );
}

#[tokio::test]
async fn test_degree_sign_split_between_network_chunks() {
    let payload = "data: {\"club\":\"52°\"}\n\ndata: [DONE]\n\n".as_bytes();
    let split = payload.iter().position(|&b| b == 0xC2).unwrap() + 1;
    let bytes = stream::iter([
        Ok::<Bytes, reqwest::Error>(Bytes::copy_from_slice(&payload[..split])),
        Ok(Bytes::copy_from_slice(&payload[split..])),
    ]);

    let mut sse = create_sse_stream(bytes, parse_club, "test-service");
    let mut chunks = Vec::new();
    while let Some(item) = sse.next().await {
        chunks.push(item.unwrap());
    }

    assert_eq!(deltas(&chunks), "52°");
}
