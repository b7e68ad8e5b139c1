// ABOUTME: Generic OpenAI-compatible chat-completions provider over HTTPS
// ABOUTME: Configured instances cover both Perplexity and OpenAI backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # `OpenAI`-Compatible Provider
//!
//! Both backends the engine talks to — Perplexity (primary) and `OpenAI`
//! (fallback) — speak the same chat-completions wire format, so one provider
//! implementation parameterized by [`OpenAiCompatibleConfig`] covers both.
//!
//! ## Configuration
//!
//! API keys come from the environment:
//! - `PERPLEXITY_API_KEY` for [`OpenAiCompatibleProvider::perplexity_from_env`]
//! - `OPENAI_API_KEY` for [`OpenAiCompatibleProvider::openai_from_env`]

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider};
use crate::errors::AppError;

/// Environment variable for the Perplexity API key
const PERPLEXITY_API_KEY_ENV: &str = "PERPLEXITY_API_KEY";

/// Environment variable for the OpenAI API key
const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Perplexity chat-completions endpoint
const PERPLEXITY_BASE_URL: &str = "https://api.perplexity.ai";

/// OpenAI chat-completions endpoint
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Model used on the Perplexity backend
const PERPLEXITY_MODEL: &str = "llama-3.1-sonar-large-128k-online";

/// Model used on the OpenAI backend
const OPENAI_MODEL: &str = "gpt-4o-mini";

/// Generation is user-initiated and latency-sensitive; fail fast
const REQUEST_TIMEOUT_SECS: u64 = 60;

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

impl From<&ChatMessage> for WireMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireResponseMessage,
}

#[derive(Debug, Deserialize)]
struct WireResponseMessage {
    content: Option<String>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Static configuration for one OpenAI-compatible backend
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL without trailing slash
    pub base_url: &'static str,
    /// Bearer token
    pub api_key: String,
    /// Model to request
    pub default_model: &'static str,
    /// Unique provider identifier
    pub provider_name: &'static str,
    /// Human-readable name for diagnostics
    pub display_name: &'static str,
}

/// Chat-completions provider for any OpenAI-compatible endpoint
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a provider from explicit configuration
    #[must_use]
    pub fn new(config: OpenAiCompatibleConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self { client, config }
    }

    /// Create the Perplexity provider from `PERPLEXITY_API_KEY`
    ///
    /// # Errors
    ///
    /// Returns a config error if the environment variable is not set.
    pub fn perplexity_from_env() -> Result<Self, AppError> {
        let api_key = require_env(PERPLEXITY_API_KEY_ENV)?;
        Ok(Self::new(OpenAiCompatibleConfig {
            base_url: PERPLEXITY_BASE_URL,
            api_key,
            default_model: PERPLEXITY_MODEL,
            provider_name: "perplexity",
            display_name: "Perplexity (Sonar)",
        }))
    }

    /// Create the OpenAI provider from `OPENAI_API_KEY`
    ///
    /// # Errors
    ///
    /// Returns a config error if the environment variable is not set.
    pub fn openai_from_env() -> Result<Self, AppError> {
        let api_key = require_env(OPENAI_API_KEY_ENV)?;
        Ok(Self::new(OpenAiCompatibleConfig {
            base_url: OPENAI_BASE_URL,
            api_key,
            default_model: OPENAI_MODEL,
            provider_name: "openai",
            display_name: "OpenAI (GPT-4o mini)",
        }))
    }

    fn api_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }
}

fn require_env(var: &str) -> Result<String, AppError> {
    env::var(var).map_err(|_| AppError::config(format!("missing {var} environment variable")))
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        self.config.provider_name
    }

    fn display_name(&self) -> &'static str {
        self.config.display_name
    }

    fn default_model(&self) -> &str {
        self.config.default_model
    }

    #[instrument(skip(self, request), fields(provider = self.config.provider_name))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        debug!("sending chat completion request");

        let wire_request = WireRequest {
            model: self.config.default_model.to_owned(),
            messages: request.messages.iter().map(WireMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(self.api_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                error!("request failed: {e}");
                AppError::external_service(self.config.provider_name, format!("failed to connect: {e}"))
                    .with_source(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AppError::external_service(
                self.config.provider_name,
                format!("failed to read response: {e}"),
            )
            .with_source(e)
        })?;

        if !status.is_success() {
            return Err(AppError::external_service(
                self.config.provider_name,
                format!(
                    "API error ({status}): {}",
                    body.chars().take(200).collect::<String>()
                ),
            ));
        }

        let wire_response: WireResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::malformed_response(format!(
                "{}: response envelope is not valid JSON: {e}",
                self.config.provider_name
            ))
            .with_source(e)
        })?;

        let content = wire_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AppError::malformed_response(format!(
                    "{}: API returned no choices",
                    self.config.provider_name
                ))
            })?;

        debug!(chars = content.len(), "received response");

        Ok(ChatResponse {
            content,
            model: wire_response.model,
        })
    }
}
