// ABOUTME: Ordered provider fallback chain with failure collection
// ABOUTME: Tries the primary backend, then exactly one fallback, reporting both causes
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Provider Fallback Chain
//!
//! Generation and interpretation are user-initiated, latency-sensitive
//! actions, so the retry policy is deliberately shallow: try the primary
//! provider, then the fallback, then give up. A payload that parses wrong is
//! treated the same as a transport failure — it triggers the next provider —
//! and when everything fails the resulting error carries every underlying
//! cause for diagnostics.

use tracing::{info, warn};

use super::{ChatRequest, LlmProvider};
use crate::errors::AppError;

/// A successfully parsed response, tagged with the provider that served it
#[derive(Debug, Clone)]
pub struct Parsed<T> {
    /// The parsed payload
    pub value: T,
    /// Identifier of the provider that ultimately served the response
    pub provider: &'static str,
    /// Model reported by that provider
    pub model: String,
}

/// An ordered list of providers tried in sequence
pub struct ProviderChain {
    providers: Vec<Box<dyn LlmProvider>>,
}

impl ProviderChain {
    /// Build a chain from an explicit provider order
    #[must_use]
    pub fn new(providers: Vec<Box<dyn LlmProvider>>) -> Self {
        Self { providers }
    }

    /// The standard chain: Perplexity primary, OpenAI fallback
    ///
    /// # Errors
    ///
    /// Returns a config error if either API key environment variable is
    /// missing.
    pub fn from_env() -> Result<Self, AppError> {
        use super::OpenAiCompatibleProvider;
        Ok(Self::new(vec![
            Box::new(OpenAiCompatibleProvider::perplexity_from_env()?),
            Box::new(OpenAiCompatibleProvider::openai_from_env()?),
        ]))
    }

    /// Registered provider names, in fallback order
    #[must_use]
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Run the request through the chain, parsing each raw response
    ///
    /// The parse step runs inside the fallback loop: a provider whose payload
    /// fails `parse` is recorded as a failure and the next provider is tried
    /// with an equivalent request.
    ///
    /// # Errors
    ///
    /// `GenerationUnavailable` carrying every underlying failure when all
    /// providers fail.
    pub async fn complete_and_parse<T, F>(
        &self,
        request: &ChatRequest,
        parse: F,
    ) -> Result<Parsed<T>, AppError>
    where
        F: Fn(&str) -> Result<T, AppError>,
    {
        let mut failures: Vec<(&'static str, AppError)> = Vec::new();

        for provider in &self.providers {
            match provider.complete(request).await {
                Ok(response) => match parse(&response.content) {
                    Ok(value) => {
                        if !failures.is_empty() {
                            info!(
                                provider = provider.name(),
                                "fallback provider served the response"
                            );
                        }
                        return Ok(Parsed {
                            value,
                            provider: provider.name(),
                            model: response.model,
                        });
                    }
                    Err(err) => {
                        warn!(provider = provider.name(), error = %err, "unusable payload, trying next provider");
                        failures.push((provider.name(), err));
                    }
                },
                Err(err) => {
                    warn!(provider = provider.name(), error = %err, "provider call failed, trying next provider");
                    failures.push((provider.name(), err));
                }
            }
        }

        Err(AppError::generation_unavailable(&failures))
    }
}
