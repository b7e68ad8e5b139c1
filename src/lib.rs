// ABOUTME: Library entry point for the nutriplan meal-plan engine
// ABOUTME: Meal-plan assembly, LLM-backed generation, and schedule reconciliation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # Nutriplan
//!
//! A meal-plan assembly and reconciliation engine for nutrition practices.
//! The engine maintains a 10-day, 9-slot meal schedule that is populated by
//! an LLM-generated anchor grid constrained to a fixed meal catalog, then
//! continuously edited through three independent paths:
//!
//! - free-text commands interpreted into structured directives;
//! - per-day detox-plan substitution from a static registry;
//! - direct manual cell edits, which always win.
//!
//! ## Architecture
//!
//! - **`catalog`** / **`detox`**: static, read-only data loaded once
//! - **`llm`**: provider contract, Perplexity/OpenAI backends, and the
//!   two-tier fallback chain
//! - **`generation`** / **`interpreter`**: the two network clients, each a
//!   pure transform from validated input to parsed output
//! - **`schedule`**: the reconciliation engine holding the 90-cell state
//! - **`session`**: single-writer ownership plus stale-response gating
//! - **`metabolic`**: BMR/TDEE estimates that produce the target calories
//!
//! ## Example
//!
//! ```rust,no_run
//! use nutriplan::generation::PlanGenerator;
//! use nutriplan::schedule::DetoxAssignments;
//! use nutriplan::session::PlanSession;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     nutriplan::logging::init()?;
//!
//!     let generator = PlanGenerator::from_env()?;
//!     let mut session = PlanSession::new();
//!     let assignments = DetoxAssignments::new();
//!
//!     let ticket = session.begin_generation();
//!     let outcome = generator.generate(1500.0, &assignments).await?;
//!     session.complete_generation(ticket, &outcome.grid, &assignments)?;
//!
//!     println!("{:?}", session.status());
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod detox;
pub mod errors;
pub mod generation;
pub mod interpreter;
pub mod llm;
pub mod logging;
pub mod metabolic;
pub mod models;
pub mod schedule;
pub mod session;

pub use errors::{AppError, AppResult, ErrorCode};
pub use models::{Day, Directive, GeneratedAnchorGrid, MealAction, MealSlot, RawDirective};
pub use schedule::{BatchOutcome, DetoxAssignments, Schedule, ScheduleStatus};
pub use session::PlanSession;
