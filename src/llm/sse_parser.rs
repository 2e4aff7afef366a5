// ABOUTME: Line-buffering SSE parser for streamed chat completions
// ABOUTME: Handles partial lines across network chunks and several events per chunk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # SSE Stream Parser
//!
//! Network chunks do not line up with SSE event boundaries. A single chunk may
//! carry several `data:` lines, and a JSON payload may be split across two
//! chunks. [`SseLineBuffer`] accumulates bytes until a full line is available;
//! [`create_sse_stream`] turns a byte stream into a [`ChatStream`] given a
//! closure that decodes one `data:` payload.

use bytes::Bytes;
use futures_util::{Stream, StreamExt};

use super::{ChatStream, StreamChunk};
use crate::errors::AppError;

/// Terminator payload used by OpenAI-compatible streams
const DONE_MARKER: &str = "[DONE]";

/// A parsed SSE event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    /// A `data:` payload with the prefix stripped
    Data(String),
    /// The `[DONE]` terminator
    Done,
}

/// Accumulates raw bytes and yields complete SSE events
///
/// Lines are decoded only once their newline has arrived, so a multi-byte
/// character split across network chunks is reassembled first.
#[derive(Debug, Default)]
pub struct SseLineBuffer {
    buffer: Vec<u8>,
}

impl SseLineBuffer {
    /// Create an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one network chunk, returning every event completed by it
    ///
    /// A trailing partial line stays buffered until the next call.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            events.extend(parse_line(&String::from_utf8_lossy(&line)));
        }
        events
    }

    /// Parse whatever remains once the byte stream has ended
    pub fn flush(&mut self) -> Vec<SseEvent> {
        let remaining = std::mem::take(&mut self.buffer);
        parse_line(&String::from_utf8_lossy(&remaining))
            .into_iter()
            .collect()
    }
}

/// Parse a single SSE line; blank lines and non-data fields yield nothing
fn parse_line(line: &str) -> Option<SseEvent> {
    let payload = line.trim().strip_prefix("data:")?.trim();
    if payload.is_empty() {
        None
    } else if payload == DONE_MARKER {
        Some(SseEvent::Done)
    } else {
        Some(SseEvent::Data(payload.to_owned()))
    }
}

/// Build a [`ChatStream`] from a raw SSE byte stream
///
/// `parse_data` decodes one `data:` payload; returning `None` skips it.
/// Empty non-final deltas are dropped. The stream ends at `[DONE]`, at the end
/// of the byte stream, or after the first transport error (which is yielded
/// tagged with `service`).
pub fn create_sse_stream<S, F>(byte_stream: S, parse_data: F, service: &'static str) -> ChatStream
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
    F: Fn(&str) -> Option<Result<StreamChunk, AppError>> + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut byte_stream = Box::pin(byte_stream);
        let mut parser = SseLineBuffer::new();
        let mut exhausted = false;

        'read: while !exhausted {
            let events = match byte_stream.next().await {
                Some(Ok(bytes)) => parser.feed(&bytes),
                Some(Err(error)) => {
                    yield Err(AppError::external_service(
                        service,
                        format!("stream read error: {error}"),
                    ));
                    break 'read;
                }
                None => {
                    exhausted = true;
                    parser.flush()
                }
            };

            for event in events {
                match event {
                    SseEvent::Done => {
                        yield Ok(StreamChunk::done());
                        break 'read;
                    }
                    SseEvent::Data(payload) => match parse_data(&payload) {
                        Some(Ok(chunk)) if chunk.delta.is_empty() && !chunk.is_final => {}
                        Some(item) => yield item,
                        None => {}
                    },
                }
            }
        }
    })
}
