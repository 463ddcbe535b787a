// ABOUTME: Health recommendation provider with typed upstream failures and explicit fallback
// ABOUTME: Wraps an injectable LLM client, bounds each call by a timeout, never fails outward
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recommendation Provider
//!
//! [`RecommendationProvider::generate`] reports every upstream failure as a
//! [`RecommendationError`]. [`RecommendationProvider::recommend`] is the
//! infallible entry point used by the snapshot pipeline: it logs the failure
//! and substitutes the fallback advisory.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::RecommendationConfig;
use crate::errors::AppError;
use crate::llm::prompts::{fallback_advisory, recommendation_prompt, RECOMMENDATION_SYSTEM_PROMPT};
use crate::llm::{
    ChatMessage, ChatRequest, LlmProvider, OpenAiCompatibleConfig, OpenAiCompatibleProvider,
};
use crate::models::VitalsReading;

/// Why a recommendation could not be produced by the upstream model
#[derive(Debug, Error)]
pub enum RecommendationError {
    /// No API credential is configured
    #[error("recommendation service is not configured")]
    NotConfigured,
    /// The upstream call exceeded its time budget
    #[error("recommendation request timed out after {0:?}")]
    Timeout(Duration),
    /// The upstream call failed (transport, status, or body)
    #[error("recommendation request failed: {0}")]
    Upstream(#[from] AppError),
    /// The upstream answered with blank content
    #[error("recommendation service returned empty content")]
    EmptyResponse,
}

/// Produces the advisory text attached to each snapshot
pub struct RecommendationProvider {
    client: Option<Arc<dyn LlmProvider>>,
    model: Option<String>,
    max_tokens: u32,
    timeout: Duration,
}

impl RecommendationProvider {
    /// Provider backed by `client`
    #[must_use]
    pub fn new(client: Arc<dyn LlmProvider>, max_tokens: u32, timeout: Duration) -> Self {
        Self {
            client: Some(client),
            model: None,
            max_tokens,
            timeout,
        }
    }

    /// Provider with no upstream; every call yields the fallback advisory
    #[must_use]
    pub const fn fallback_only() -> Self {
        Self {
            client: None,
            model: None,
            max_tokens: crate::constants::defaults::RECOMMENDATION_MAX_TOKENS,
            timeout: Duration::from_secs(crate::constants::timeouts::RECOMMENDATION_TIMEOUT_SECS),
        }
    }

    /// Override the model requested from the client
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Build from configuration
    ///
    /// A missing API key is not an error: a warning is logged once here and
    /// the provider runs in fallback mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn from_config(config: &RecommendationConfig) -> Result<Self, AppError> {
        if !config.is_configured() {
            warn!("OPENAI_API_KEY not set; health recommendations will use the fallback advisory");
            return Ok(Self {
                max_tokens: config.max_tokens,
                timeout: config.timeout(),
                ..Self::fallback_only()
            });
        }

        let provider =
            OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::from_recommendation_config(config))?;
        Ok(Self::new(Arc::new(provider), config.max_tokens, config.timeout())
            .with_model(config.model.clone()))
    }

    /// Whether an upstream client is attached
    #[must_use]
    pub fn is_llm_backed(&self) -> bool {
        self.client.is_some()
    }

    /// Ask the upstream model for recommendations on `reading`
    ///
    /// # Errors
    ///
    /// Returns [`RecommendationError`] when no client is configured, the call
    /// times out or fails, or the content is blank
    pub async fn generate(&self, reading: &VitalsReading) -> Result<String, RecommendationError> {
        let client = self
            .client
            .as_ref()
            .ok_or(RecommendationError::NotConfigured)?;

        let mut request = ChatRequest::new(vec![
            ChatMessage::system(RECOMMENDATION_SYSTEM_PROMPT),
            ChatMessage::user(recommendation_prompt(reading)),
        ])
        .with_max_tokens(self.max_tokens);
        if let Some(model) = &self.model {
            request = request.with_model(model.clone());
        }

        let response = tokio::time::timeout(self.timeout, client.complete(&request))
            .await
            .map_err(|_| RecommendationError::Timeout(self.timeout))??;

        let content = response.content.trim();
        if content.is_empty() {
            return Err(RecommendationError::EmptyResponse);
        }

        debug!(
            model = %response.model,
            chars = content.len(),
            "Generated health recommendation"
        );
        Ok(content.to_owned())
    }

    /// Recommendations for `reading`, falling back to the generic advisory
    pub async fn recommend(&self, reading: &VitalsReading) -> String {
        match self.generate(reading).await {
            Ok(text) => text,
            Err(RecommendationError::NotConfigured) => {
                debug!("Recommendation service not configured, using fallback advisory");
                fallback_for(reading)
            }
            Err(RecommendationError::Upstream(e)) => {
                warn!(
                    operation = "generate_health_recommendation",
                    error = %e,
                    details = %e.details,
                    "Recommendation request failed, using fallback advisory"
                );
                fallback_for(reading)
            }
            Err(e) => {
                warn!(
                    operation = "generate_health_recommendation",
                    error = %e,
                    "Recommendation request failed, using fallback advisory"
                );
                fallback_for(reading)
            }
        }
    }

    /// Check the upstream model service, bounded by the request timeout
    pub async fn upstream_status(&self) -> UpstreamStatus {
        let Some(client) = &self.client else {
            return UpstreamStatus::Disabled;
        };

        match tokio::time::timeout(self.timeout, client.health_check()).await {
            Ok(Ok(true)) => UpstreamStatus::Reachable,
            Ok(Ok(false)) => UpstreamStatus::Unreachable,
            Ok(Err(e)) => {
                warn!(provider = client.name(), error = %e, "Upstream health check failed");
                UpstreamStatus::Unreachable
            }
            Err(_) => {
                warn!(
                    provider = client.name(),
                    timeout = ?self.timeout,
                    "Upstream health check timed out"
                );
                UpstreamStatus::Unreachable
            }
        }
    }
}

/// Result of probing the upstream model service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamStatus {
    /// No client configured; recommendations use the fallback advisory
    Disabled,
    /// The upstream answered its health check
    Reachable,
    /// The upstream failed, rejected, or timed out its health check
    Unreachable,
}

impl UpstreamStatus {
    /// Label reported by the readiness route
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Reachable => "ok",
            Self::Unreachable => "unavailable",
        }
    }
}

fn fallback_for(reading: &VitalsReading) -> String {
    fallback_advisory(&reading.subject.first_name, &reading.subject.last_name)
}

impl std::fmt::Debug for RecommendationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationProvider")
            .field("client", &self.client.as_ref().map(|c| c.name().to_owned()))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}
