// ABOUTME: Plan generation client producing the 10-day anchor-meal grid
// ABOUTME: Validates inputs, prompts the provider chain, and soft-audits the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Plan Generation Client
//!
//! Turns a target-calorie value and the day→detox assignments into a proposed
//! 10×3 anchor grid by prompting the provider chain with the full meal
//! catalog and the constraint set. The returned grid is the unconstrained AI
//! proposal: detox assignments are sent as a hint, but the schedule engine
//! re-applies overrides deterministically afterwards rather than trusting the
//! service to have honored them.
//!
//! Catalog membership and cross-grid uniqueness are soft invariants. The
//! upstream service is not contract-bound, so a deviation is logged and
//! flagged, never fatal — failing the whole generation over one meal string
//! would leave the user with no recovery path.

use std::collections::HashSet;

use tracing::{info, instrument, warn};

use crate::catalog::MEAL_CATALOG;
use crate::errors::{AppError, AppResult};
use crate::llm::{strip_code_fences, ChatMessage, ChatRequest, ProviderChain};
use crate::models::{Day, GeneratedAnchorGrid, MealSlot};
use crate::schedule::DetoxAssignments;

/// Token budget for the 30-meal JSON response
const GENERATION_MAX_TOKENS: u32 = 2000;

/// Temperature used by both backends
const GENERATION_TEMPERATURE: f32 = 0.7;

/// Outcome of one generation attempt
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// The proposed anchor grid
    pub grid: GeneratedAnchorGrid,
    /// Which provider ultimately served the response
    pub provider: &'static str,
    /// Meals that were not found verbatim in the catalog (soft violation)
    pub off_catalog: Vec<String>,
}

/// Client for the meal-suggestion backends
pub struct PlanGenerator {
    chain: ProviderChain,
}

impl PlanGenerator {
    /// Build a generator over an explicit provider chain
    #[must_use]
    pub fn new(chain: ProviderChain) -> Self {
        Self { chain }
    }

    /// Build a generator over the standard Perplexity→OpenAI chain
    ///
    /// # Errors
    ///
    /// Returns a config error if an API key environment variable is missing.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self::new(ProviderChain::from_env()?))
    }

    /// Generate a proposed 10-day anchor grid
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if `target_calories` is not a positive finite
    ///   number; raised before any network call.
    /// - `GenerationUnavailable` if both providers fail, carrying both
    ///   underlying causes.
    #[instrument(skip(self, detox_assignments))]
    pub async fn generate(
        &self,
        target_calories: f64,
        detox_assignments: &DetoxAssignments,
    ) -> AppResult<GenerationOutcome> {
        if !target_calories.is_finite() || target_calories <= 0.0 {
            return Err(AppError::invalid_request(format!(
                "target calories must be a positive number, got {target_calories}"
            )));
        }

        let prompt = build_prompt(target_calories, &detox_summary(detox_assignments));
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)])
            .with_temperature(GENERATION_TEMPERATURE)
            .with_max_tokens(GENERATION_MAX_TOKENS);

        let parsed = self
            .chain
            .complete_and_parse(&request, parse_grid)
            .await?;

        info!(provider = parsed.provider, model = %parsed.model, "generated anchor grid");

        let off_catalog = audit_grid(&parsed.value);
        Ok(GenerationOutcome {
            grid: parsed.value,
            provider: parsed.provider,
            off_catalog,
        })
    }
}

/// Parse one provider payload into a grid; runs inside the fallback loop
fn parse_grid(raw: &str) -> AppResult<GeneratedAnchorGrid> {
    let stripped = strip_code_fences(raw);
    serde_json::from_str(&stripped).map_err(|e| {
        AppError::malformed_response(format!("grid payload is not 10 days of 3 anchors: {e}"))
            .with_source(e)
    })
}

/// Render the non-normal detox assignments for the prompt
///
/// The export surface renders its own labels; this summary only needs to be
/// unambiguous for the model.
#[must_use]
pub fn detox_summary(assignments: &DetoxAssignments) -> String {
    let mut entries: Vec<(Day, &str)> = assignments
        .iter()
        .filter(|(_, plan_id)| plan_id.as_str() != crate::detox::NORMAL_PLAN_ID)
        .map(|(&day, plan_id)| (day, plan_id.as_str()))
        .collect();
    entries.sort_by_key(|(day, _)| *day);

    if entries.is_empty() {
        return "None".to_owned();
    }

    entries
        .iter()
        .map(|(day, plan_id)| format!("day {} = {plan_id}", day.number()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Soft-check the grid against the catalog, warning on deviations
fn audit_grid(grid: &GeneratedAnchorGrid) -> Vec<String> {
    let mut off_catalog = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for (day, meals) in grid.days() {
        for slot in MealSlot::ANCHORS {
            let Some(meal) = meals.for_slot(slot) else {
                continue;
            };
            if !MEAL_CATALOG.contains(slot, meal) {
                warn!(
                    day = day.number(),
                    slot = slot.display_name(),
                    meal,
                    "generated meal is not in the catalog"
                );
                off_catalog.push(meal.to_owned());
            }
            if !seen.insert(meal) {
                warn!(
                    day = day.number(),
                    slot = slot.display_name(),
                    meal,
                    "generated meal repeats across the grid"
                );
            }
        }
    }

    off_catalog
}

fn build_prompt(target_calories: f64, detox_info: &str) -> String {
    format!(
        r#"You are a nutritionist AI creating a 10-day meal plan for an Indian household.

TARGET CALORIES: {target_calories} per day
DETOX DAYS: {detox_info}

CRITICAL RULES - YOU MUST FOLLOW THESE STRICTLY:
1. You MUST select meals ONLY from the MEAL_BANK provided below
2. DO NOT create new meals, DO NOT modify meal names
3. For BREAKFAST: ONLY pick from the breakfast array below
4. For LUNCH: ONLY pick from the lunch array below
5. For DINNER: ONLY pick from the dinner array below
6. Use the EXACT meal text from the bank (copy it exactly as written)
7. Try to select meals that best match the target calories
8. For detox days, those meals are already specified and will override your selection

VARIETY REQUIREMENTS:
9. Each meal should appear ONLY ONCE in the entire 10-day plan
10. Do NOT repeat any breakfast, lunch, or dinner across the 10 days

COOKING WORKLOAD:
11. Balance cooking complexity across each day's three meals: pair a simple
breakfast with a complex lunch and keep dinner light, never three complex
meals on the same day

MEAL_BANK:
{catalog}

Generate 30 meals total (Breakfast, Lunch, Dinner for 10 days).

RESPOND WITH ONLY VALID JSON (no markdown, no backticks):
{{
  "day1": {{"breakfast": "exact meal from breakfast array", "lunch": "...", "dinner": "..."}},
  "day2": {{"breakfast": "...", "lunch": "...", "dinner": "..."}},
  ...
  "day10": {{"breakfast": "...", "lunch": "...", "dinner": "..."}}
}}"#,
        catalog = MEAL_CATALOG.to_prompt_json(),
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn detox_summary_skips_normal_days_and_sorts() {
        let mut assignments = DetoxAssignments::new();
        assignments.insert(Day::new(5).unwrap(), "fruit-detox".to_owned());
        assignments.insert(Day::new(2).unwrap(), "liquid-detox".to_owned());
        assignments.insert(Day::new(7).unwrap(), "normal".to_owned());

        assert_eq!(
            detox_summary(&assignments),
            "day 2 = liquid-detox, day 5 = fruit-detox"
        );
        assert_eq!(detox_summary(&DetoxAssignments::new()), "None");
    }

    #[test]
    fn prompt_embeds_catalog_and_calories() {
        let prompt = build_prompt(1500.0, "None");
        assert!(prompt.contains("TARGET CALORIES: 1500"));
        assert!(prompt.contains("1 katori poha"));
    }

    #[test]
    fn parse_rejects_missing_days() {
        let err = parse_grid(r#"{"day1": {"breakfast": "a", "lunch": "b", "dinner": "c"}}"#)
            .unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::MalformedResponse);
    }
}
