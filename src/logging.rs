// ABOUTME: Logging configuration and structured logging setup for the caddie server and CLI
// ABOUTME: Configures the env filter, output format, and writer for the global tracing subscriber
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging configuration

use serde_json::json;
use std::env;
use std::io;
use tracing::info;
use tracing_subscriber::{
    filter::Directive,
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::constants::service_names;
use crate::errors::{AppError, AppResult};
use crate::models::{ShotOutcome, ShotRecord};

/// Crates whose chatter is clamped regardless of `RUST_LOG`
const NOISY_CRATE_DIRECTIVES: [&str; 3] = ["hyper=warn", "hyper::proto=warn", "reqwest=warn"];

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for terminals
    Compact,
}

/// Where log lines are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard output (server)
    Stdout,
    /// Standard error (CLI, keeps prompts clean)
    Stderr,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level directive (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Log span open/close events
    pub include_spans: bool,
    /// Output stream
    pub target: LogTarget,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_spans: false,
            target: LogTarget::Stdout,
            service_name: service_names::AGENT_CADDIE.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    ///
    /// Reads `RUST_LOG`, `LOG_FORMAT` (json, pretty, compact), `ENVIRONMENT`,
    /// `LOG_INCLUDE_LOCATION`, and `LOG_INCLUDE_SPANS`. Production turns on
    /// location and spans.
    #[must_use]
    pub fn from_env() -> Self {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_production = environment == "production";

        Self {
            level: env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
            format: parse_format(env::var("LOG_FORMAT").ok().as_deref()),
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_spans: is_production || env::var("LOG_INCLUDE_SPANS").is_ok(),
            environment,
            ..Self::default()
        }
    }

    /// Quiet configuration for the interactive CLI: warnings only, on stderr
    #[must_use]
    pub fn for_cli() -> Self {
        Self {
            level: env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
            format: LogFormat::Compact,
            target: LogTarget::Stderr,
            ..Self::default()
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let crate_directive = format!("agent_caddie={}", self.level);
        let mut filter = EnvFilter::new(&self.level);
        for directive in NOISY_CRATE_DIRECTIVES
            .iter()
            .copied()
            .chain([crate_directive.as_str()])
        {
            if let Ok(parsed) = directive.parse::<Directive>() {
                filter = filter.add_directive(parsed);
            }
        }
        filter
    }

    fn writer(&self) -> BoxMakeWriter {
        match self.target {
            LogTarget::Stdout => BoxMakeWriter::new(io::stdout),
            LogTarget::Stderr => BoxMakeWriter::new(io::stderr),
        }
    }

    /// Install the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed.
    pub fn init(&self) -> AppResult<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let result = match self.format {
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_target(true)
                        .with_span_events(span_events)
                        .with_writer(self.writer()),
                )
                .try_init(),
            LogFormat::Pretty => registry
                .with(
                    fmt::layer()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_target(true)
                        .with_span_events(span_events)
                        .with_writer(self.writer()),
                )
                .try_init(),
            LogFormat::Compact => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_writer(self.writer()),
                )
                .try_init(),
        };
        result.map_err(|e| AppError::internal(format!("Failed to initialize logging: {e}")))?;

        self.log_startup_info();
        Ok(())
    }

    fn log_startup_info(&self) {
        let summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
                "environment": self.environment
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
                "location": self.include_location,
                "spans": self.include_spans
            }
        });
        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            "Logging initialized: {summary}"
        );
    }
}

fn parse_format(value: Option<&str>) -> LogFormat {
    match value.map(str::to_lowercase).as_deref() {
        Some("json") => LogFormat::Json,
        Some("compact") => LogFormat::Compact,
        _ => LogFormat::Pretty,
    }
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> AppResult<()> {
    LoggingConfig::from_env().init()
}

/// Domain event logging
pub struct AppLogger;

impl AppLogger {
    /// Log a finished recommendation
    pub fn log_recommendation(effective_distance: f64, similar_shots: usize, text: &str) {
        info!(
            shot.effective_distance = effective_distance,
            shot.similar = similar_shots,
            recommendation.chars = text.len(),
            "Recommendation ready"
        );
    }

    /// Log a recorded shot outcome
    pub fn log_shot_recorded(record: &ShotRecord, stored: bool) {
        let ShotOutcome {
            carried,
            error,
            result,
            cause,
        } = &record.outcome;
        info!(
            user.id = %record.user_id,
            shot.club = %record.recommended_club,
            shot.carried = carried,
            shot.error = error,
            shot.result = %result,
            shot.cause = cause.map_or("none", |c| c.label()),
            shot.stored = stored,
            "Shot recorded"
        );
    }
}
