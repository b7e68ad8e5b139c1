// ABOUTME: Structured logging setup for the engine
// ABOUTME: Configures tracing-subscriber with an env-filter driven level
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logging configuration with structured output
//!
//! Honors `RUST_LOG`; defaults to `info` when unset. Safe to call once per
//! process — tests calling it repeatedly get an error from `try_init` which
//! callers may ignore.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive when `RUST_LOG` is unset
const DEFAULT_LOG_LEVEL: &str = "info";

/// Initialize the global tracing subscriber
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init()?;

    Ok(())
}
