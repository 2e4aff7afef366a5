// ABOUTME: Unit tests for environment configuration loading
// ABOUTME: Validates defaults, required variables, store selection, and the redacted summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use agent_caddie::config::environment::{parse_origins, CaddieConfig};
use agent_caddie::database::StoreKind;
use agent_caddie::errors::ErrorCode;
use serial_test::serial;
use std::collections::HashMap;
use std::env;
use std::time::Duration;

fn load(vars: &[(&str, &str)]) -> Result<CaddieConfig, agent_caddie::errors::AppError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    CaddieConfig::from_lookup(|key| vars.get(key).cloned())
}

const MEMORY_MINIMUM: &[(&str, &str)] = &[("OPENAI_API_KEY", "sk-test"), ("CADDIE_STORE", "memory")];

#[test]
fn test_defaults_with_memory_store() {
    let config = load(MEMORY_MINIMUM).unwrap();

    assert_eq!(config.bind_address(), "127.0.0.1:8000");
    assert_eq!(config.api_base_url, "http://localhost:8000");
    assert_eq!(config.cors_origins, vec!["http://localhost:8000".to_owned()]);
    assert_eq!(config.openai.base_url, "https://api.openai.com/v1");
    assert_eq!(config.openai.chat_model, "gpt-3.5-turbo");
    assert_eq!(config.openai.embedding_model, "text-embedding-ada-002");
    assert_eq!(config.store, StoreKind::Memory);
    assert!(config.supabase.is_none());
    assert_eq!(config.similar_shot_count, 3);
    assert_eq!(config.http_timeout, Duration::from_secs(60));
}

#[test]
fn test_missing_api_key() {
    let error = load(&[("CADDIE_STORE", "memory")]).unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigMissing);
    assert!(error.message.contains("OPENAI_API_KEY"));

    let blank = load(&[("OPENAI_API_KEY", "  "), ("CADDIE_STORE", "memory")]).unwrap_err();
    assert_eq!(blank.code, ErrorCode::ConfigMissing);
}

#[test]
fn test_supabase_store_requires_credentials() {
    let error = load(&[("OPENAI_API_KEY", "sk-test")]).unwrap_err();
    assert!(error.message.contains("SUPABASE_URL"));

    let error = load(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("SUPABASE_URL", "https://project.supabase.co"),
    ])
    .unwrap_err();
    assert!(error.message.contains("SUPABASE_SERVICE_ROLE_KEY"));

    let config = load(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("SUPABASE_URL", "https://project.supabase.co"),
        ("SUPABASE_SERVICE_ROLE_KEY", "service-key"),
        ("HTTP_TIMEOUT_SECS", "15"),
    ])
    .unwrap();
    assert_eq!(config.store, StoreKind::Supabase);
    let supabase = config.supabase.unwrap();
    assert_eq!(supabase.url, "https://project.supabase.co");
    assert_eq!(supabase.timeout, Duration::from_secs(15));
}

#[test]
fn test_invalid_values() {
    let mut vars = MEMORY_MINIMUM.to_vec();
    vars.push(("HTTP_PORT", "eighty"));
    assert_eq!(load(&vars).unwrap_err().code, ErrorCode::ConfigInvalid);

    let mut vars = MEMORY_MINIMUM.to_vec();
    vars.push(("SIMILAR_SHOT_COUNT", "-1"));
    assert_eq!(load(&vars).unwrap_err().code, ErrorCode::ConfigInvalid);

    let error = load(&[("OPENAI_API_KEY", "sk-test"), ("CADDIE_STORE", "postgres")]).unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);
}

#[test]
fn test_overrides_and_origins() {
    let mut vars = MEMORY_MINIMUM.to_vec();
    vars.extend([
        ("HOST", "0.0.0.0"),
        ("HTTP_PORT", "9000"),
        ("API_BASE_URL", "https://caddie.example.com"),
        ("CORS_ALLOWED_ORIGINS", "https://a.example.com, https://b.example.com,"),
        ("OPENAI_MODEL", "gpt-4o-mini"),
        ("SIMILAR_SHOT_COUNT", "5"),
    ]);
    let config = load(&vars).unwrap();

    assert_eq!(config.bind_address(), "0.0.0.0:9000");
    assert_eq!(
        config.cors_origins,
        vec![
            "https://a.example.com".to_owned(),
            "https://b.example.com".to_owned()
        ]
    );
    let settings = config.caddie_settings();
    assert_eq!(settings.model.as_deref(), Some("gpt-4o-mini"));
    assert_eq!(settings.match_count, 5);
}

#[test]
fn test_parse_origins_wildcard() {
    assert_eq!(parse_origins("*"), vec!["*".to_owned()]);
    assert!(parse_origins(" , ").is_empty());
}

#[test]
fn test_summary_leaves_out_secrets() {
    let config = load(&[
        ("OPENAI_API_KEY", "sk-very-secret"),
        ("SUPABASE_URL", "https://project.supabase.co"),
        ("SUPABASE_SERVICE_ROLE_KEY", "service-very-secret"),
    ])
    .unwrap();

    let summary = config.summary();
    assert!(summary.contains("https://project.supabase.co"));
    assert!(!summary.contains("sk-very-secret"));
    assert!(!summary.contains("service-very-secret"));
    assert!(!format!("{config:?}").contains("service-very-secret"));
}

#[test]
#[serial]
fn test_from_env_reads_process_environment() {
    env::set_var("OPENAI_API_KEY", "sk-from-env");
    env::set_var("CADDIE_STORE", "memory");
    env::set_var("HTTP_PORT", "8123");

    let config = CaddieConfig::from_env().unwrap();
    assert_eq!(config.http_port, 8123);
    assert_eq!(config.store, StoreKind::Memory);

    env::remove_var("OPENAI_API_KEY");
    env::remove_var("CADDIE_STORE");
    env::remove_var("HTTP_PORT");
}
