// ABOUTME: Unified error handling for the meal-plan engine
// ABOUTME: Defines error codes, the AppError type, and convenience constructors
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Unified Error Handling
//!
//! Every failure in the engine maps to one [`AppError`] with a stable
//! [`ErrorCode`]. Errors are scoped to a single user action: nothing here is
//! fatal to the process, and a failed action always leaves prior schedule
//! state untouched so the user can retry without data loss.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Caller-supplied input failed a precondition; never retried
    #[serde(rename = "INVALID_REQUEST")]
    InvalidRequest,
    /// Both the primary and the fallback provider failed
    #[serde(rename = "GENERATION_UNAVAILABLE")]
    GenerationUnavailable,
    /// A provider responded but the payload could not be parsed
    #[serde(rename = "MALFORMED_RESPONSE")]
    MalformedResponse,
    /// Detox plan id is not registered; a data/config bug, not transient
    #[serde(rename = "UNKNOWN_PLAN")]
    UnknownPlan,
    /// One interpreted directive failed validation; never aborts its batch
    #[serde(rename = "INVALID_DIRECTIVE")]
    InvalidDirective,
    /// A single provider call failed at the transport level
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalService,
    /// Required configuration (API key) is missing or invalid
    #[serde(rename = "CONFIG_ERROR")]
    Config,
}

impl ErrorCode {
    /// User-facing description of this error class
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "The provided input is invalid",
            Self::GenerationUnavailable => "The meal generation service is unavailable",
            Self::MalformedResponse => "The service returned an unreadable response",
            Self::UnknownPlan => "The detox plan is not registered",
            Self::InvalidDirective => "The meal directive is invalid",
            Self::ExternalService => "An external service encountered an error",
            Self::Config => "Configuration error encountered",
        }
    }
}

/// Unified error type for the engine
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new error with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach a source error for chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// A caller-supplied precondition failed; raised before any network call
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Every provider in the fallback chain failed
    ///
    /// The message carries each underlying failure so the caller can report
    /// diagnostics without re-running the chain.
    pub fn generation_unavailable(failures: &[(&'static str, Self)]) -> Self {
        let detail = failures
            .iter()
            .map(|(provider, err)| format!("{provider}: {err}"))
            .collect::<Vec<_>>()
            .join("; ");
        Self::new(
            ErrorCode::GenerationUnavailable,
            format!("all providers failed ({detail})"),
        )
    }

    /// Transport succeeded but the payload does not match the expected shape
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MalformedResponse, message)
    }

    /// Detox plan id lookup failed
    pub fn unknown_plan(plan_id: &str) -> Self {
        Self::new(
            ErrorCode::UnknownPlan,
            format!("detox plan '{plan_id}' is not registered"),
        )
    }

    /// One directive in a batch failed validation
    pub fn invalid_directive(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidDirective, message)
    }

    /// A provider call failed at the transport level
    pub fn external_service(provider: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalService,
            format!("{provider}: {}", message.into()),
        )
    }

    /// Missing or invalid configuration
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Config, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
