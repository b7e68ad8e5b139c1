// ABOUTME: Integration tests for the command interpreter client
// ABOUTME: Covers input validation, fallback, and directive flow into the schedule
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::ScriptedProvider;
use nutriplan::errors::ErrorCode;
use nutriplan::interpreter::CommandInterpreter;
use nutriplan::llm::ProviderChain;
use nutriplan::models::{Day, MealSlot};
use nutriplan::schedule::Schedule;

fn interpreter_with(providers: Vec<ScriptedProvider>) -> CommandInterpreter {
    CommandInterpreter::new(ProviderChain::new(
        providers
            .into_iter()
            .map(|p| Box::new(p) as Box<dyn nutriplan::llm::LlmProvider>)
            .collect(),
    ))
}

#[tokio::test]
async fn rejects_blank_input_before_any_call() {
    let interpreter = interpreter_with(vec![ScriptedProvider::failing("primary", "boom")]);

    for blank in ["", "   ", "\n\t"] {
        let err = interpreter.interpret(blank).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }
}

#[tokio::test]
async fn parses_directives_from_fenced_payload() {
    let payload = r#"```json
[
  {"type": "constant", "mealTime": "Evening", "food": "green tea", "action": "replace"},
  {"type": "anchor", "mealTime": "Lunch", "day": 3, "food": "1 Paneer Wrap", "action": "replace"}
]
```"#;
    let interpreter = interpreter_with(vec![ScriptedProvider::ok("primary", payload)]);

    let outcome = interpreter.interpret("daily evening green tea, day 3 lunch paneer wrap").await.unwrap();
    assert_eq!(outcome.provider, "primary");
    assert_eq!(outcome.directives.len(), 2);
    assert_eq!(outcome.directives[0].scope, "constant");
    assert_eq!(outcome.directives[1].day, Some(3));
}

#[tokio::test]
async fn conversational_reply_falls_through_to_secondary() {
    let interpreter = interpreter_with(vec![
        ScriptedProvider::ok("primary", "Sure! Here's what I understood: ..."),
        ScriptedProvider::ok(
            "secondary",
            r#"[{"type": "constant", "mealTime": "Bedtime", "food": "1 glass warm milk"}]"#,
        ),
    ]);

    let outcome = interpreter.interpret("bedtime warm milk").await.unwrap();
    assert_eq!(outcome.provider, "secondary");
    assert_eq!(outcome.directives.len(), 1);
}

#[tokio::test]
async fn total_failure_reports_generation_unavailable() {
    let interpreter = interpreter_with(vec![
        ScriptedProvider::failing("primary", "timeout"),
        ScriptedProvider::failing("secondary", "rate limited"),
    ]);

    let err = interpreter.interpret("daily evening green tea").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::GenerationUnavailable);
}

#[tokio::test]
async fn interpreted_constant_directive_fans_out_across_the_schedule() {
    let interpreter = interpreter_with(vec![ScriptedProvider::ok(
        "primary",
        r#"[{"type": "constant", "mealTime": "Evening", "food": "green tea", "action": "replace"}]"#,
    )]);

    let outcome = interpreter.interpret("daily evening green tea").await.unwrap();

    let mut schedule = Schedule::new();
    let batch = schedule.apply_directives(&outcome.directives);
    assert_eq!(batch.applied, 1);
    for d in Day::all() {
        assert_eq!(schedule.cell(d, MealSlot::Evening), "green tea");
    }
}

#[tokio::test]
async fn mixed_valid_and_invalid_directives_apply_partially() {
    // The interpreter passes structurally-valid JSON through; semantic
    // validation happens at merge time, one directive at a time.
    let interpreter = interpreter_with(vec![ScriptedProvider::ok(
        "primary",
        r#"[
          {"type": "anchor", "mealTime": "Dinner", "day": 12, "food": "soup"},
          {"type": "anchor", "mealTime": "Dinner", "day": 2, "food": "1 bowl Chicken Soup"}
        ]"#,
    )]);

    let outcome = interpreter.interpret("day 12 and day 2 dinner soup").await.unwrap();

    let mut schedule = Schedule::new();
    let batch = schedule.apply_directives(&outcome.directives);
    assert_eq!(batch.applied, 1);
    assert_eq!(batch.skipped.len(), 1);
    assert_eq!(
        schedule.cell(Day::new(2).unwrap(), MealSlot::Dinner),
        "1 bowl Chicken Soup"
    );
}
