// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, stream cadence, upstream LLM credentials, and CORS
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use crate::constants::{defaults, env_config, security, timeouts};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Values supplied on the command line, taking precedence over the environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// `--port`
    pub http_port: Option<u16>,
    /// `--host`
    pub host: Option<String>,
    /// `--stream-interval-secs`
    pub emission_interval_secs: Option<u64>,
}

/// Streaming endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Seconds between two snapshot emissions on one stream
    pub emission_interval_secs: u64,
}

impl StreamConfig {
    /// Emission period as a `Duration`
    #[must_use]
    pub const fn emission_interval(&self) -> Duration {
        Duration::from_secs(self.emission_interval_secs)
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            emission_interval_secs: defaults::STREAM_INTERVAL_SECS,
        }
    }
}

/// Upstream text-generation service configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// API key; `None` puts recommendations in fallback mode
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Chat model name
    pub model: String,
    /// Completion token budget
    pub max_tokens: u32,
    /// Upper bound on one call, in seconds
    pub timeout_secs: u64,
}

impl RecommendationConfig {
    /// Whether an API key is configured
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Call timeout as a `Duration`
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: defaults::OPENAI_BASE_URL.to_owned(),
            model: defaults::OPENAI_MODEL.to_owned(),
            max_tokens: defaults::RECOMMENDATION_MAX_TOKENS,
            timeout_secs: timeouts::RECOMMENDATION_TIMEOUT_SECS,
        }
    }
}

// Keeps the API key out of logs
impl fmt::Debug for RecommendationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecommendationConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Cross-origin policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// `*` or a comma-separated origin list
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: security::CORS_ALLOWED_ORIGINS.to_owned(),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Streaming endpoint settings
    pub stream: StreamConfig,
    /// Recommendation service settings
    pub recommendations: RecommendationConfig,
    /// CORS settings
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::HOST.to_owned(),
            http_port: defaults::HTTP_PORT,
            stream: StreamConfig::default(),
            recommendations: RecommendationConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first when present.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to a value that cannot be parsed.
    /// Cross-field checks are left to [`Self::validate`] so command-line
    /// overrides can still replace a bad value.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file loaded: {}", e);
        }

        let config = Self {
            host: env_config::host(),
            http_port: parse_env("PORT", defaults::HTTP_PORT)?,
            stream: StreamConfig {
                emission_interval_secs: parse_env(
                    "VITALS_STREAM_INTERVAL_SECS",
                    defaults::STREAM_INTERVAL_SECS,
                )?,
            },
            recommendations: RecommendationConfig {
                api_key: env::var("OPENAI_API_KEY")
                    .ok()
                    .map(|k| k.trim().to_owned())
                    .filter(|k| !k.is_empty()),
                base_url: env_var_or("OPENAI_BASE_URL", defaults::OPENAI_BASE_URL),
                model: env_var_or("OPENAI_MODEL", defaults::OPENAI_MODEL),
                max_tokens: parse_env("OPENAI_MAX_TOKENS", defaults::RECOMMENDATION_MAX_TOKENS)?,
                timeout_secs: parse_env(
                    "RECOMMENDATION_TIMEOUT_SECS",
                    timeouts::RECOMMENDATION_TIMEOUT_SECS,
                )?,
            },
            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", security::CORS_ALLOWED_ORIGINS),
            },
        };

        Ok(config)
    }

    /// Load from the environment, apply `overrides`, then validate once
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or the final
    /// configuration fails validation
    pub fn load(overrides: ConfigOverrides) -> AppResult<Self> {
        let config = Self::from_env()?.with_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Replace every field for which an override is present
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(port) = overrides.http_port {
            self.http_port = port;
        }
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(secs) = overrides.emission_interval_secs {
            self.stream.emission_interval_secs = secs;
        }
        self
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error if the emission interval, token budget, or timeout is zero
    pub fn validate(&self) -> AppResult<()> {
        if self.stream.emission_interval_secs == 0 {
            return Err(AppError::config(
                "VITALS_STREAM_INTERVAL_SECS must be greater than zero",
            ));
        }
        if self.recommendations.max_tokens == 0 {
            return Err(AppError::config("OPENAI_MAX_TOKENS must be greater than zero"));
        }
        if self.recommendations.timeout_secs == 0 {
            return Err(AppError::config(
                "RECOMMENDATION_TIMEOUT_SECS must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Human-readable, secret-free configuration summary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "PulseCare Vitals Configuration:\n\
             - Bind: {}:{}\n\
             - Stream Interval: {}s\n\
             - Recommendations: {}\n\
             - Model: {} ({})\n\
             - CORS Origins: {}",
            self.host,
            self.http_port,
            self.stream.emission_interval_secs,
            if self.recommendations.is_configured() {
                "LLM"
            } else {
                "Fallback only (OPENAI_API_KEY not set)"
            },
            self.recommendations.model,
            self.recommendations.base_url,
            self.cors.allowed_origins,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env<T: FromStr>(key: &str, default: T) -> AppResult<T> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::config_invalid(key, &raw)),
        Err(_) => Ok(default),
    }
}
