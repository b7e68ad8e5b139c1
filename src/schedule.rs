// ABOUTME: Schedule reconciliation engine holding the 90-cell meal plan state
// ABOUTME: Merges generated grids, detox overrides, directives, and manual edits
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Schedule Reconciliation Engine
//!
//! The schedule is the single mutable value of a plan session: 9 meal slots ×
//! 10 days, plus a per-day detox assignment map. Four mutation sources feed
//! it — the generated anchor grid, detox reassignment, interpreted
//! directives, and direct manual edits — and they must compose without
//! silently losing a prior edit. The rules:
//!
//! - detox overrides always win over the generated grid;
//! - directives apply in order, last write wins per cell;
//! - a manual edit always wins and is afterwards indistinguishable from any
//!   other source (no provenance tracking);
//! - a failed operation writes nothing (all-or-nothing per user action,
//!   except directive batches where per-directive skipping is expected).

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::detox::{self, NORMAL_PLAN_ID};
use crate::errors::AppResult;
use crate::models::{Day, Directive, GeneratedAnchorGrid, MealAction, MealSlot, RawDirective};

/// Separator used when appending onto a non-empty cell
const APPEND_SEPARATOR: &str = ", ";

/// Per-day detox plan assignments; days absent from the map are `normal`
pub type DetoxAssignments = HashMap<Day, String>;

/// Completion summary over the 90-cell schedule
///
/// Recomputed freshly on every call; at O(90) and human-interaction
/// frequency there is nothing worth caching.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleStatus {
    /// Constant slots with a non-empty value on every day
    pub constant_slots_fully_filled: usize,
    /// Always 6
    pub total_constant_slots: usize,
    /// Anchor cells counted individually per (day, slot)
    pub anchor_cells_filled: usize,
    /// Always 30
    pub total_anchor_cells: usize,
    /// Non-empty cells across the whole schedule
    pub filled_cells: usize,
    /// Always 90
    pub total_cells: usize,
    /// `filled_cells / total_cells * 100`
    pub percent_filled: f64,
}

/// A directive that failed validation, with the reason it was skipped
#[derive(Debug, Clone, Serialize)]
pub struct SkippedDirective {
    /// The offending directive as received from the interpreter
    pub directive: RawDirective,
    /// Why it was rejected
    pub reason: String,
}

/// Result of applying a directive batch; partial application is expected
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    /// Directives applied, in order
    pub applied: usize,
    /// Directives rejected at the validation boundary
    pub skipped: Vec<SkippedDirective>,
}

/// The in-memory 90-cell schedule plus detox assignments
#[derive(Debug, Clone, Serialize)]
pub struct Schedule {
    /// `cells[day.index()][slot.index()]`, empty string = unfilled
    cells: [[String; 9]; 10],
    /// Detox plan id per day
    detox: [String; 10],
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new()
    }
}

impl Schedule {
    /// Create an empty schedule with every day on the `normal` plan
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: std::array::from_fn(|_| std::array::from_fn(|_| String::new())),
            detox: std::array::from_fn(|_| NORMAL_PLAN_ID.to_owned()),
        }
    }

    /// The value of one cell; empty string means unfilled
    #[must_use]
    pub fn cell(&self, day: Day, slot: MealSlot) -> &str {
        &self.cells[day.index()][slot.index()]
    }

    /// The detox plan id assigned to a day
    #[must_use]
    pub fn detox_plan_id(&self, day: Day) -> &str {
        &self.detox[day.index()]
    }

    /// Iterate every cell as `(day, slot, value)` for export snapshots
    pub fn cells(&self) -> impl Iterator<Item = (Day, MealSlot, &str)> {
        Day::all().flat_map(move |day| {
            MealSlot::ALL
                .into_iter()
                .map(move |slot| (day, slot, self.cell(day, slot)))
        })
    }

    /// Load the generated anchor grid, then apply detox overrides on top
    ///
    /// Ordering matters: detox overrides always win over the generated grid,
    /// and only the anchor cells for which the assigned plan defines a
    /// non-null override are replaced. Calling this twice with the same
    /// inputs yields the same final cell values.
    ///
    /// # Errors
    ///
    /// Fails with `UnknownPlan` before writing anything if any assigned plan
    /// id is unregistered.
    pub fn load_generated_grid(
        &mut self,
        grid: &GeneratedAnchorGrid,
        assignments: &DetoxAssignments,
    ) -> AppResult<()> {
        // Resolve every plan up front so a bad id leaves the schedule untouched.
        let mut overrides = Vec::with_capacity(assignments.len());
        for (&day, plan_id) in assignments {
            overrides.push((day, detox::get(plan_id)?));
        }

        for (day, meals) in grid.days() {
            for slot in MealSlot::ANCHORS {
                if let Some(value) = meals.for_slot(slot) {
                    self.cells[day.index()][slot.index()] = value.to_owned();
                }
            }
        }

        for (day, plan) in overrides {
            if plan.is_normal() {
                self.detox[day.index()] = NORMAL_PLAN_ID.to_owned();
                continue;
            }
            for slot in MealSlot::ANCHORS {
                if let Some(value) = plan.override_for(slot) {
                    self.cells[day.index()][slot.index()] = value.to_owned();
                }
            }
            self.detox[day.index()] = plan.id.to_owned();
        }

        debug!(days = Day::COUNT, "loaded generated anchor grid");
        Ok(())
    }

    /// Switch one day to a different detox plan
    ///
    /// Unconditionally overwrites that day's three anchor cells: the plan's
    /// override value where it defines one, empty string where it does not.
    /// This models the plan's own meals rather than "leave as before" — a
    /// plan switch replaces all three anchors. Constant slots are never
    /// touched.
    ///
    /// # Errors
    ///
    /// Fails with `UnknownPlan` without modifying any cell.
    pub fn reassign_detox(&mut self, day: Day, plan_id: &str) -> AppResult<()> {
        let plan = detox::get(plan_id)?;

        for slot in MealSlot::ANCHORS {
            self.cells[day.index()][slot.index()] =
                plan.override_for(slot).unwrap_or_default().to_owned();
        }
        self.detox[day.index()] = plan.id.to_owned();

        debug!(day = day.number(), plan = plan.id, "reassigned detox plan");
        Ok(())
    }

    /// Apply a batch of interpreted directives in order
    ///
    /// Each raw directive is validated at this boundary; invalid ones are
    /// collected into the outcome's `skipped` list without aborting their
    /// siblings (directives are independent). Later directives addressing
    /// the same cell win.
    pub fn apply_directives(&mut self, raw_directives: &[RawDirective]) -> BatchOutcome {
        let mut outcome = BatchOutcome {
            applied: 0,
            skipped: Vec::new(),
        };

        for raw in raw_directives {
            match Directive::try_from(raw) {
                Ok(Directive::Constant { slot, food, action }) => {
                    for day in Day::all() {
                        self.apply_action(day, slot, &food, action);
                    }
                    outcome.applied += 1;
                }
                Ok(Directive::Anchor {
                    slot,
                    day,
                    food,
                    action,
                }) => {
                    self.apply_action(day, slot, &food, action);
                    outcome.applied += 1;
                }
                Err(err) => {
                    debug!(reason = %err, "skipping directive");
                    outcome.skipped.push(SkippedDirective {
                        directive: raw.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        outcome
    }

    /// Direct manual overwrite of one cell; always allowed, always wins
    pub fn edit_cell(&mut self, day: Day, slot: MealSlot, value: impl Into<String>) {
        self.cells[day.index()][slot.index()] = value.into();
    }

    /// Freshly recompute the completion summary
    #[must_use]
    pub fn compute_status(&self) -> ScheduleStatus {
        let constant_slots_fully_filled = MealSlot::CONSTANTS
            .into_iter()
            .filter(|&slot| Day::all().all(|day| !self.cell(day, slot).is_empty()))
            .count();

        let anchor_cells_filled = MealSlot::ANCHORS
            .into_iter()
            .map(|slot| Day::all().filter(|&day| !self.cell(day, slot).is_empty()).count())
            .sum();

        let filled_cells = self.cells().filter(|(_, _, value)| !value.is_empty()).count();
        let total_cells = Day::COUNT as usize * MealSlot::ALL.len();

        ScheduleStatus {
            constant_slots_fully_filled,
            total_constant_slots: MealSlot::CONSTANTS.len(),
            anchor_cells_filled,
            total_anchor_cells: MealSlot::ANCHORS.len() * Day::COUNT as usize,
            filled_cells,
            total_cells,
            percent_filled: filled_cells as f64 / total_cells as f64 * 100.0,
        }
    }

    fn apply_action(&mut self, day: Day, slot: MealSlot, food: &str, action: MealAction) {
        let cell = &mut self.cells[day.index()][slot.index()];
        match action {
            MealAction::Replace => {
                *cell = food.to_owned();
            }
            MealAction::Append => {
                if cell.is_empty() {
                    *cell = food.to_owned();
                } else {
                    cell.push_str(APPEND_SEPARATOR);
                    cell.push_str(food);
                }
            }
        }
    }
}
