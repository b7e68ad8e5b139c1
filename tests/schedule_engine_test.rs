// ABOUTME: Integration tests for the schedule reconciliation engine
// ABOUTME: Covers grid loading, detox precedence, directives, edits, and status
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use nutriplan::detox;
use nutriplan::errors::ErrorCode;
use nutriplan::models::{Day, GeneratedAnchorGrid, MealSlot, RawDirective};
use nutriplan::schedule::{DetoxAssignments, Schedule};

fn day(n: u8) -> Day {
    Day::new(n).unwrap()
}

fn sample_grid() -> GeneratedAnchorGrid {
    serde_json::from_str(&common::catalog_grid_json()).unwrap()
}

fn constant_directive(meal_time: &str, food: &str, action: Option<&str>) -> RawDirective {
    RawDirective {
        scope: "constant".into(),
        meal_time: meal_time.into(),
        day: None,
        food: food.into(),
        action: action.map(str::to_owned),
    }
}

fn anchor_directive(meal_time: &str, day: Option<i64>, food: &str) -> RawDirective {
    RawDirective {
        scope: "anchor".into(),
        meal_time: meal_time.into(),
        day,
        food: food.into(),
        action: None,
    }
}

// =============================================================================
// Grid Loading
// =============================================================================

#[test]
fn load_fills_all_anchor_cells_and_no_constants() {
    let mut schedule = Schedule::new();
    schedule
        .load_generated_grid(&sample_grid(), &DetoxAssignments::new())
        .unwrap();

    for d in Day::all() {
        for slot in MealSlot::ANCHORS {
            assert!(!schedule.cell(d, slot).is_empty());
        }
        for slot in MealSlot::CONSTANTS {
            assert!(schedule.cell(d, slot).is_empty());
        }
    }

    let status = schedule.compute_status();
    assert_eq!(status.anchor_cells_filled, 30);
    assert_eq!(status.filled_cells, 30);
    assert_eq!(status.constant_slots_fully_filled, 0);
    assert!((status.percent_filled - 100.0 * 30.0 / 90.0).abs() < 1e-9);
}

#[test]
fn load_is_idempotent() {
    let grid = sample_grid();
    let mut assignments = DetoxAssignments::new();
    assignments.insert(day(4), "liquid-detox".to_owned());

    let mut once = Schedule::new();
    once.load_generated_grid(&grid, &assignments).unwrap();

    let mut twice = Schedule::new();
    twice.load_generated_grid(&grid, &assignments).unwrap();
    twice.load_generated_grid(&grid, &assignments).unwrap();

    for d in Day::all() {
        for slot in MealSlot::ALL {
            assert_eq!(once.cell(d, slot), twice.cell(d, slot));
        }
    }
}

#[test]
fn detox_overrides_win_over_generated_grid() {
    let grid = sample_grid();
    let mut assignments = DetoxAssignments::new();
    assignments.insert(day(3), "fruit-detox".to_owned());

    let mut schedule = Schedule::new();
    schedule.load_generated_grid(&grid, &assignments).unwrap();

    let plan = detox::get("fruit-detox").unwrap();
    for slot in MealSlot::ANCHORS {
        assert_eq!(schedule.cell(day(3), slot), plan.override_for(slot).unwrap());
    }
    // Other days keep the generated proposal.
    assert_eq!(schedule.cell(day(1), MealSlot::Breakfast), grid.day1.breakfast);
    assert_eq!(schedule.detox_plan_id(day(3)), "fruit-detox");
}

#[test]
fn load_with_unknown_plan_writes_nothing() {
    let mut assignments = DetoxAssignments::new();
    assignments.insert(day(2), "not-a-plan".to_owned());

    let mut schedule = Schedule::new();
    let err = schedule
        .load_generated_grid(&sample_grid(), &assignments)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::UnknownPlan);

    for (_, _, value) in schedule.cells() {
        assert!(value.is_empty());
    }
}

#[test]
fn partial_override_plan_only_touches_defined_slots_on_load() {
    // protein-detox defines breakfast only.
    let grid = sample_grid();
    let mut assignments = DetoxAssignments::new();
    assignments.insert(day(6), "protein-detox".to_owned());

    let mut schedule = Schedule::new();
    schedule.load_generated_grid(&grid, &assignments).unwrap();

    assert_eq!(
        schedule.cell(day(6), MealSlot::Breakfast),
        "2 Boiled Eggs + green tea"
    );
    assert_eq!(schedule.cell(day(6), MealSlot::Lunch), grid.day6.lunch);
    assert_eq!(schedule.cell(day(6), MealSlot::Dinner), grid.day6.dinner);
}

// =============================================================================
// Detox Reassignment
// =============================================================================

#[test]
fn reassignment_replaces_all_three_anchors() {
    let mut schedule = Schedule::new();
    schedule
        .load_generated_grid(&sample_grid(), &DetoxAssignments::new())
        .unwrap();

    schedule.reassign_detox(day(3), "protein-detox").unwrap();

    // Defined override wins; undefined overrides clear to empty, not
    // "leave as before".
    assert_eq!(
        schedule.cell(day(3), MealSlot::Breakfast),
        "2 Boiled Eggs + green tea"
    );
    assert_eq!(schedule.cell(day(3), MealSlot::Lunch), "");
    assert_eq!(schedule.cell(day(3), MealSlot::Dinner), "");
    assert_eq!(schedule.detox_plan_id(day(3)), "protein-detox");
}

#[test]
fn reassignment_never_touches_constants() {
    let mut schedule = Schedule::new();
    schedule.edit_cell(day(3), MealSlot::Evening, "green tea");

    schedule.reassign_detox(day(3), "liquid-detox").unwrap();
    assert_eq!(schedule.cell(day(3), MealSlot::Evening), "green tea");
}

#[test]
fn unknown_plan_reassignment_changes_nothing() {
    let mut schedule = Schedule::new();
    schedule
        .load_generated_grid(&sample_grid(), &DetoxAssignments::new())
        .unwrap();
    let before = schedule.clone();

    let err = schedule.reassign_detox(day(5), "moon-dust").unwrap_err();
    assert_eq!(err.code, ErrorCode::UnknownPlan);

    for d in Day::all() {
        for slot in MealSlot::ALL {
            assert_eq!(schedule.cell(d, slot), before.cell(d, slot));
        }
        assert_eq!(schedule.detox_plan_id(d), before.detox_plan_id(d));
    }
}

// =============================================================================
// Directives
// =============================================================================

#[test]
fn constant_replace_fans_out_to_all_days() {
    let mut schedule = Schedule::new();
    let outcome =
        schedule.apply_directives(&[constant_directive("Evening", "green tea", Some("replace"))]);

    assert_eq!(outcome.applied, 1);
    assert!(outcome.skipped.is_empty());
    for d in Day::all() {
        assert_eq!(schedule.cell(d, MealSlot::Evening), "green tea");
    }
}

#[test]
fn append_concatenates_with_separator_only_when_nonempty() {
    let mut schedule = Schedule::new();
    schedule.edit_cell(day(2), MealSlot::Midday, "A");

    schedule.apply_directives(&[
        RawDirective {
            scope: "anchor".into(),
            meal_time: "Midday".into(),
            day: Some(2),
            food: "B".into(),
            action: Some("append".into()),
        },
        RawDirective {
            scope: "anchor".into(),
            meal_time: "Midday".into(),
            day: Some(3),
            food: "B".into(),
            action: Some("append".into()),
        },
    ]);

    assert_eq!(schedule.cell(day(2), MealSlot::Midday), "A, B");
    assert_eq!(schedule.cell(day(3), MealSlot::Midday), "B");
}

#[test]
fn invalid_days_are_skipped_without_aborting_the_batch() {
    let mut schedule = Schedule::new();
    let outcome = schedule.apply_directives(&[
        anchor_directive("Breakfast", Some(0), "poha"),
        anchor_directive("Breakfast", Some(11), "poha"),
        anchor_directive("Breakfast", None, "poha"),
        anchor_directive("Breakfast", Some(4), "1 katori poha"),
    ]);

    assert_eq!(outcome.applied, 1);
    assert_eq!(outcome.skipped.len(), 3);
    assert_eq!(schedule.cell(day(4), MealSlot::Breakfast), "1 katori poha");
    // Nothing else was touched.
    assert_eq!(schedule.compute_status().filled_cells, 1);
}

#[test]
fn later_directive_wins_on_the_same_cell() {
    let mut schedule = Schedule::new();
    schedule.apply_directives(&[
        anchor_directive("Dinner", Some(7), "1 bowl Pumpkin soup"),
        anchor_directive("Dinner", Some(7), "1 bowl Chicken Soup"),
    ]);

    assert_eq!(schedule.cell(day(7), MealSlot::Dinner), "1 bowl Chicken Soup");
}

#[test]
fn unknown_meal_time_is_reported_with_reason() {
    let mut schedule = Schedule::new();
    let outcome = schedule.apply_directives(&[constant_directive("Brunch", "toast", None)]);

    assert_eq!(outcome.applied, 0);
    assert_eq!(outcome.skipped.len(), 1);
    assert!(outcome.skipped[0].reason.contains("Brunch"));
}

// =============================================================================
// Manual Edits & Status
// =============================================================================

#[test]
fn manual_edit_always_wins_including_over_detox() {
    let mut schedule = Schedule::new();
    schedule.reassign_detox(day(3), "liquid-detox").unwrap();
    schedule.edit_cell(day(3), MealSlot::Lunch, "1 Paneer Wrap");

    assert_eq!(schedule.cell(day(3), MealSlot::Lunch), "1 Paneer Wrap");
}

#[test]
fn constant_slot_counts_only_when_all_ten_days_filled() {
    let mut schedule = Schedule::new();
    for d in Day::all() {
        schedule.edit_cell(d, MealSlot::EarlyMorning, "warm water");
    }
    for d in Day::all().take(9) {
        schedule.edit_cell(d, MealSlot::Evening, "green tea");
    }

    let status = schedule.compute_status();
    assert_eq!(status.constant_slots_fully_filled, 1);
    assert_eq!(status.total_constant_slots, 6);
    assert_eq!(status.filled_cells, 19);
    assert_eq!(status.total_cells, 90);
}

#[test]
fn empty_schedule_status_is_all_zero() {
    let status = Schedule::new().compute_status();
    assert_eq!(status.filled_cells, 0);
    assert_eq!(status.anchor_cells_filled, 0);
    assert!(status.percent_filled.abs() < f64::EPSILON);
}
