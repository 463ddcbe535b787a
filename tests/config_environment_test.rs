// ABOUTME: Unit tests for config environment functionality
// ABOUTME: Validates environment parsing, defaults, overrides, and error handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::time::Duration;

use pulsecare_vitals::config::{ConfigOverrides, ServerConfig};
use pulsecare_vitals::errors::ErrorCode;
use serial_test::serial;

const VARS: [&str; 9] = [
    "HOST",
    "PORT",
    "VITALS_STREAM_INTERVAL_SECS",
    "OPENAI_API_KEY",
    "OPENAI_BASE_URL",
    "OPENAI_MODEL",
    "OPENAI_MAX_TOKENS",
    "RECOMMENDATION_TIMEOUT_SECS",
    "CORS_ALLOWED_ORIGINS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_when_environment_is_empty() {
    clear_env();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.http_port, 5001);
    assert_eq!(config.stream.emission_interval(), Duration::from_secs(1800));
    assert!(!config.recommendations.is_configured());
    assert_eq!(config.recommendations.model, "gpt-4o");
    assert_eq!(config.recommendations.max_tokens, 150);
    assert_eq!(config.recommendations.base_url, "https://api.openai.com/v1");
    assert_eq!(config.cors.allowed_origins, "*");
}

#[test]
#[serial]
fn test_overrides_are_applied() {
    clear_env();
    env::set_var("PORT", "8080");
    env::set_var("VITALS_STREAM_INTERVAL_SECS", "5");
    env::set_var("OPENAI_API_KEY", "  sk-abc  ");
    env::set_var("OPENAI_MODEL", "gpt-4o-mini");
    env::set_var("RECOMMENDATION_TIMEOUT_SECS", "3");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.http_port, 8080);
    assert_eq!(config.stream.emission_interval_secs, 5);
    assert_eq!(config.recommendations.api_key.as_deref(), Some("sk-abc"));
    assert_eq!(config.recommendations.model, "gpt-4o-mini");
    assert_eq!(config.recommendations.timeout(), Duration::from_secs(3));
}

#[test]
#[serial]
fn test_blank_api_key_means_fallback_mode() {
    clear_env();
    env::set_var("OPENAI_API_KEY", "   ");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert!(!config.recommendations.is_configured());
    assert!(config.summary().contains("Fallback only"));
}

#[test]
#[serial]
fn test_invalid_port_is_config_error() {
    clear_env();
    env::set_var("PORT", "not-a-port");

    let err = ServerConfig::from_env().unwrap_err();
    clear_env();

    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    assert!(err.message.contains("PORT"));
}

#[test]
#[serial]
fn test_zero_interval_is_rejected() {
    clear_env();
    env::set_var("VITALS_STREAM_INTERVAL_SECS", "0");

    let err = ServerConfig::load(ConfigOverrides::default()).unwrap_err();
    clear_env();

    assert_eq!(err.code, ErrorCode::ConfigError);
}

#[test]
#[serial]
fn test_cli_override_replaces_invalid_environment_interval() {
    clear_env();
    env::set_var("VITALS_STREAM_INTERVAL_SECS", "0");
    env::set_var("PORT", "6000");

    let config = ServerConfig::load(ConfigOverrides {
        http_port: Some(7000),
        emission_interval_secs: Some(15),
        ..ConfigOverrides::default()
    })
    .unwrap();
    clear_env();

    assert_eq!(config.stream.emission_interval(), Duration::from_secs(15));
    assert_eq!(config.http_port, 7000);
    assert_eq!(config.host, "0.0.0.0");
}

#[test]
#[serial]
fn test_invalid_cli_override_is_rejected() {
    clear_env();

    let err = ServerConfig::load(ConfigOverrides {
        emission_interval_secs: Some(0),
        ..ConfigOverrides::default()
    })
    .unwrap_err();

    assert_eq!(err.code, ErrorCode::ConfigError);
}

#[test]
#[serial]
fn test_summary_never_contains_api_key() {
    clear_env();
    env::set_var("OPENAI_API_KEY", "sk-very-secret");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    let summary = config.summary();
    assert!(!summary.contains("sk-very-secret"));
    assert!(summary.contains("LLM"));
    assert!(!serde_json::to_string(&config).unwrap().contains("sk-very-secret"));
}
