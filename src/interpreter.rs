// ABOUTME: Command interpreter client turning free text into meal directives
// ABOUTME: Validates input, prompts the provider chain, parses the directive array
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Command Interpreter Client
//!
//! Turns a nutritionist's free-text instruction ("daily evening green tea",
//! "day 3 lunch paneer wrap") into structured [`RawDirective`]s. The
//! classification rules live in the request contract — "daily" or no day
//! number means a constant directive fanned out across all 10 days, "day N"
//! plus an anchor name means a single-cell anchor directive — and the engine
//! re-checks only the day-presence invariant before merging.

use tracing::{info, instrument};

use crate::errors::{AppError, AppResult};
use crate::llm::{strip_code_fences, ChatMessage, ChatRequest, ProviderChain};
use crate::models::RawDirective;

/// Directive lists are short; cap the response accordingly
const INTERPRET_MAX_TOKENS: u32 = 1000;

/// Temperature used by both backends
const INTERPRET_TEMPERATURE: f32 = 0.7;

/// Outcome of one interpretation attempt
#[derive(Debug, Clone)]
pub struct InterpretationOutcome {
    /// Directives as returned by the backend, not yet merged
    pub directives: Vec<RawDirective>,
    /// Which provider ultimately served the response
    pub provider: &'static str,
}

/// Client for the natural-language-to-directive backend
pub struct CommandInterpreter {
    chain: ProviderChain,
}

impl CommandInterpreter {
    /// Build an interpreter over an explicit provider chain
    #[must_use]
    pub fn new(chain: ProviderChain) -> Self {
        Self { chain }
    }

    /// Build an interpreter over the standard Perplexity→OpenAI chain
    ///
    /// # Errors
    ///
    /// Returns a config error if an API key environment variable is missing.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self::new(ProviderChain::from_env()?))
    }

    /// Interpret a free-text command into meal directives
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if the trimmed input is empty; raised before any
    ///   network call.
    /// - `GenerationUnavailable` if both providers fail.
    #[instrument(skip(self))]
    pub async fn interpret(&self, free_text: &str) -> AppResult<InterpretationOutcome> {
        let input = free_text.trim();
        if input.is_empty() {
            return Err(AppError::invalid_request("command text is empty"));
        }

        let request = ChatRequest::new(vec![ChatMessage::user(build_prompt(input))])
            .with_temperature(INTERPRET_TEMPERATURE)
            .with_max_tokens(INTERPRET_MAX_TOKENS);

        let parsed = self
            .chain
            .complete_and_parse(&request, parse_directives)
            .await?;

        info!(
            provider = parsed.provider,
            count = parsed.value.len(),
            "interpreted command"
        );

        Ok(InterpretationOutcome {
            directives: parsed.value,
            provider: parsed.provider,
        })
    }
}

/// Parse one provider payload into a directive list; runs inside the
/// fallback loop
fn parse_directives(raw: &str) -> AppResult<Vec<RawDirective>> {
    let stripped = strip_code_fences(raw);
    serde_json::from_str(&stripped).map_err(|e| {
        AppError::malformed_response(format!("directive payload is not a JSON array: {e}"))
            .with_source(e)
    })
}

fn build_prompt(input: &str) -> String {
    format!(
        r#"You are a meal plan interpreter. Extract meal information from natural language commands.

The user is a nutritionist creating a 10-day meal plan. There are 9 meal times:

CONSTANTS (auto-fill all 10 days):
- Early Morning, Before Breakfast, Midday, Post-Lunch, Evening, Bedtime

ANCHORS (specific day only):
- Breakfast, Lunch, Dinner

Rules:
1. If the command includes "daily" or no day number, classify as CONSTANT (fills all 10 days)
2. If the command includes "day X" for Breakfast/Lunch/Dinner, classify as ANCHOR for that specific day
3. Handle slash (/) as "or" alternatives within one food description
4. Handle plus (+) as additions within one food description
5. Extract food descriptions after meal time names

Command: "{input}"

Respond with ONLY valid JSON (no markdown, no backticks):
[
  {{
    "type": "constant" or "anchor",
    "mealTime": "Early Morning" or "Breakfast" etc,
    "day": 1 (only for anchors),
    "food": "extracted food description",
    "action": "replace" or "append"
  }}
]"#
    )
}
