// ABOUTME: Environment configuration for server binding, collaborators, and storage selection
// ABOUTME: Reads variables (after loading .env) and renders a redacted summary for startup logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `127.0.0.1` |
//! | `HTTP_PORT` | `8000` |
//! | `API_BASE_URL` | `http://localhost:8000` |
//! | `CORS_ALLOWED_ORIGINS` | value of `API_BASE_URL` |
//! | `OPENAI_API_KEY` | required |
//! | `OPENAI_BASE_URL` | `https://api.openai.com/v1` |
//! | `OPENAI_MODEL` | `gpt-3.5-turbo` |
//! | `OPENAI_EMBEDDING_MODEL` | `text-embedding-ada-002` |
//! | `CADDIE_STORE` | `supabase` |
//! | `SUPABASE_URL`, `SUPABASE_SERVICE_ROLE_KEY` | required for the supabase store |
//! | `SIMILAR_SHOT_COUNT` | `3` |
//! | `HTTP_TIMEOUT_SECS` | `60` |

use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

use crate::constants::recommendation::DEFAULT_MATCH_COUNT;
use crate::database::{StoreKind, SupabaseConfig};
use crate::errors::{AppError, AppResult};
use crate::llm::{OpenAiConfig, DEFAULT_BASE_URL, DEFAULT_CHAT_MODEL, DEFAULT_EMBEDDING_MODEL};
use crate::services::CaddieSettings;

/// Default bind host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 8000;

/// Default public base URL
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Default collaborator request timeout
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Complete runtime configuration
#[derive(Debug, Clone)]
pub struct CaddieConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub http_port: u16,
    /// Public base URL of the API
    pub api_base_url: String,
    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,
    /// Text-generation and embedding settings
    pub openai: OpenAiConfig,
    /// Storage backend
    pub store: StoreKind,
    /// Supabase settings, present whenever both variables are set
    pub supabase: Option<SupabaseConfig>,
    /// Similar shots retrieved per recommendation
    pub similar_shot_count: usize,
    /// Collaborator request timeout
    pub http_timeout: Duration,
}

impl CaddieConfig {
    /// Load `.env` if present, then read configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` for an absent required variable and
    /// `ConfigInvalid` for one that cannot be parsed.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {e}");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Same as [`CaddieConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let var_or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_owned());

        let http_timeout = Duration::from_secs(parse_or(
            "HTTP_TIMEOUT_SECS",
            var("HTTP_TIMEOUT_SECS"),
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?);

        let api_base_url = var_or("API_BASE_URL", DEFAULT_API_BASE_URL);
        let cors_origins = parse_origins(
            &var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| api_base_url.clone()),
        );

        let openai = OpenAiConfig {
            base_url: var_or("OPENAI_BASE_URL", DEFAULT_BASE_URL),
            api_key: var("OPENAI_API_KEY").ok_or_else(|| AppError::config_missing("OPENAI_API_KEY"))?,
            chat_model: var_or("OPENAI_MODEL", DEFAULT_CHAT_MODEL),
            embedding_model: var_or("OPENAI_EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            timeout: http_timeout,
        };

        let store = StoreKind::from_str(&var_or("CADDIE_STORE", StoreKind::Supabase.as_str()))?;
        let supabase = match (var("SUPABASE_URL"), var("SUPABASE_SERVICE_ROLE_KEY")) {
            (Some(url), Some(service_role_key)) => Some(SupabaseConfig {
                url,
                service_role_key,
                timeout: http_timeout,
            }),
            (None, _) if store == StoreKind::Supabase => {
                return Err(AppError::config_missing("SUPABASE_URL"));
            }
            (Some(_), None) if store == StoreKind::Supabase => {
                return Err(AppError::config_missing("SUPABASE_SERVICE_ROLE_KEY"));
            }
            _ => None,
        };

        let similar_shot_count = parse_or(
            "SIMILAR_SHOT_COUNT",
            var("SIMILAR_SHOT_COUNT"),
            DEFAULT_MATCH_COUNT,
        )?;

        Ok(Self {
            host: var_or("HOST", DEFAULT_HOST),
            http_port: parse_or("HTTP_PORT", var("HTTP_PORT"), DEFAULT_HTTP_PORT)?,
            api_base_url,
            cors_origins,
            openai,
            store,
            supabase,
            similar_shot_count,
            http_timeout,
        })
    }

    /// `host:port` for the listener
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// Service tunables derived from this configuration
    #[must_use]
    pub fn caddie_settings(&self) -> CaddieSettings {
        CaddieSettings {
            model: Some(self.openai.chat_model.clone()),
            match_count: self.similar_shot_count,
        }
    }

    /// Human-readable summary with secrets left out
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Agent Caddie Configuration:\n\
             - Bind: {}\n\
             - API Base URL: {}\n\
             - CORS Origins: {}\n\
             - OpenAI Base URL: {}\n\
             - Chat Model: {}\n\
             - Embedding Model: {}\n\
             - Store: {}\n\
             - Supabase: {}\n\
             - Similar Shots: {}\n\
             - HTTP Timeout: {}s",
            self.bind_address(),
            self.api_base_url,
            self.cors_origins.join(", "),
            self.openai.base_url,
            self.openai.chat_model,
            self.openai.embedding_model,
            self.store,
            self.supabase
                .as_ref()
                .map_or("Not configured", |s| s.url.as_str()),
            self.similar_shot_count,
            self.http_timeout.as_secs(),
        )
    }
}

/// Parse an optional variable, falling back to a default when unset
fn parse_or<T>(key: &str, value: Option<String>, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e| AppError::config_invalid(key, format!("'{raw}': {e}")))
    })
}

/// Parse comma-separated CORS origins
#[must_use]
pub fn parse_origins(origins: &str) -> Vec<String> {
    if origins.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
