// ABOUTME: Shared HTTP client construction and collaborator error mapping
// ABOUTME: Turns transport failures and non-success statuses into service-tagged AppErrors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use reqwest::{Client, ClientBuilder, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, warn};

use crate::errors::AppError;

/// Connection timeout applied to every collaborator client
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Longest upstream body excerpt copied into an error message
const ERROR_BODY_EXCERPT_CHARS: usize = 200;

/// Build a client with the given whole-request timeout
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised.
pub fn build_client(timeout: Duration) -> Result<Client, AppError> {
    ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()
        .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))
}

/// Map a failed send to a tagged collaborator error
#[must_use]
pub fn transport_error(service: &'static str, error: &reqwest::Error) -> AppError {
    error!(service, "Request failed: {error}");
    if error.is_connect() || error.is_timeout() {
        AppError::external_unavailable(service, format!("unreachable: {error}"))
    } else {
        AppError::external_service(service, format!("request failed: {error}"))
    }
}

/// Error bodies in the `{"error": {"message": ...}}` shape
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// `PostgREST` error bodies carry `message` at the top level
#[derive(Debug, Deserialize)]
struct FlatError {
    message: String,
}

/// Pull the most useful message out of an upstream error body
fn error_message(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.error.message;
    }
    if let Ok(flat) = serde_json::from_str::<FlatError>(body) {
        return flat.message;
    }
    body.chars().take(ERROR_BODY_EXCERPT_CHARS).collect()
}

/// Map a non-success HTTP status to a tagged collaborator error
#[must_use]
pub fn status_error(service: &'static str, status: StatusCode, body: &str) -> AppError {
    let message = error_message(body);
    warn!(service, status = status.as_u16(), "Upstream returned an error");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            AppError::external_auth_failed(service, message)
        }
        StatusCode::TOO_MANY_REQUESTS => AppError::external_rate_limited(service, message),
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            AppError::external_unavailable(service, message)
        }
        _ => AppError::external_service(service, format!("HTTP {status}: {message}")),
    }
}

/// Send a request and fail on any non-success status
///
/// # Errors
///
/// Returns a tagged collaborator error for transport failures and
/// non-success statuses.
pub async fn send_checked(
    service: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<reqwest::Response, AppError> {
    let response = request
        .send()
        .await
        .map_err(|e| transport_error(service, &e))?;

    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(status_error(service, status, &body))
    }
}
