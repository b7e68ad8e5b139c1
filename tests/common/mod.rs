// ABOUTME: Shared test fixtures: scripted LLM providers and grid payload builders
// ABOUTME: Used by the generation, interpreter, and session integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)] // not every test binary uses every fixture

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use nutriplan::catalog::MEAL_CATALOG;
use nutriplan::errors::AppError;
use nutriplan::llm::{ChatRequest, ChatResponse, LlmProvider};
use nutriplan::models::MealSlot;

/// A provider that always returns the same scripted outcome
pub struct ScriptedProvider {
    name: &'static str,
    reply: Result<String, String>,
}

impl ScriptedProvider {
    pub fn ok(name: &'static str, content: impl Into<String>) -> Self {
        Self {
            name,
            reply: Ok(content.into()),
        }
    }

    pub fn failing(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            reply: Err(message.into()),
        }
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn display_name(&self) -> &'static str {
        self.name
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        match &self.reply {
            Ok(content) => Ok(ChatResponse {
                content: content.clone(),
                model: "scripted-model".to_owned(),
            }),
            Err(message) => Err(AppError::external_service(self.name, message.clone())),
        }
    }
}

/// A valid 10-day grid built from distinct catalog entries
pub fn catalog_grid_json() -> String {
    let breakfasts = MEAL_CATALOG.for_slot(MealSlot::Breakfast).unwrap();
    let lunches = MEAL_CATALOG.for_slot(MealSlot::Lunch).unwrap();
    let dinners = MEAL_CATALOG.for_slot(MealSlot::Dinner).unwrap();

    let mut days = Map::new();
    for i in 0..10 {
        days.insert(
            format!("day{}", i + 1),
            json!({
                "breakfast": breakfasts[i],
                "lunch": lunches[i],
                "dinner": dinners[i],
            }),
        );
    }
    Value::Object(days).to_string()
}
