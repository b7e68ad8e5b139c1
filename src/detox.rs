// ABOUTME: Detox plan registry mapping plan ids to fixed anchor-meal overrides
// ABOUTME: Static lookup table with display metadata; constants are never overridden
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Detox Plan Registry
//!
//! A detox day replaces a day's anchor meals with a fixed named plan instead
//! of AI generation. Plans only ever override the three anchor slots; an
//! override of `None` means the plan defines no meal for that slot (on a full
//! reassignment that slot is cleared, not left at its prior value).
//!
//! The registry is static and read-only. `normal` is always registered with
//! all three overrides `None`, meaning no override at all.

use crate::errors::{AppError, AppResult};
use crate::models::MealSlot;

/// Plan id meaning "no detox override"
pub const NORMAL_PLAN_ID: &str = "normal";

/// A named detox plan with fixed anchor-slot override meals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetoxPlan {
    /// Stable identifier used in detox assignments
    pub id: &'static str,
    /// Human-readable name for headers and export labels
    pub display_name: &'static str,
    /// Breakfast override, `None` = plan defines no breakfast
    pub breakfast: Option<&'static str>,
    /// Lunch override
    pub lunch: Option<&'static str>,
    /// Dinner override
    pub dinner: Option<&'static str>,
}

impl DetoxPlan {
    /// The plan's override for an anchor slot; always `None` for constants
    #[must_use]
    pub fn override_for(&self, slot: MealSlot) -> Option<&'static str> {
        match slot {
            MealSlot::Breakfast => self.breakfast,
            MealSlot::Lunch => self.lunch,
            MealSlot::Dinner => self.dinner,
            _ => None,
        }
    }

    /// Whether this is the no-override plan
    #[must_use]
    pub fn is_normal(&self) -> bool {
        self.id == NORMAL_PLAN_ID
    }
}

static REGISTRY: &[DetoxPlan] = &[
    DetoxPlan {
        id: NORMAL_PLAN_ID,
        display_name: "Normal Day",
        breakfast: None,
        lunch: None,
        dinner: None,
    },
    DetoxPlan {
        id: "liquid-detox",
        display_name: "Liquid Detox",
        breakfast: Some("1 glass warm lemon water + 1 glass veg juice"),
        lunch: Some("1 bowl Clear veg soup"),
        dinner: Some("1 bowl Moong Ghiya soup"),
    },
    DetoxPlan {
        id: "fruit-detox",
        display_name: "Fruit Detox",
        breakfast: Some("500 gm Melon + 1 glass coconut water + 1 tsp Chia Seeds"),
        lunch: Some("1 katori Papaya bowl"),
        dinner: Some("1 bowl Carrot-beet soup"),
    },
    DetoxPlan {
        id: "protein-detox",
        display_name: "Protein Detox",
        breakfast: Some("2 Boiled Eggs + green tea"),
        lunch: None,
        dinner: None,
    },
];

/// Look up a detox plan by id
///
/// # Errors
///
/// Returns [`crate::errors::ErrorCode::UnknownPlan`] for an unregistered id.
/// Callers must treat this as fatal to the triggering operation and apply
/// nothing partially.
pub fn get(plan_id: &str) -> AppResult<&'static DetoxPlan> {
    REGISTRY
        .iter()
        .find(|plan| plan.id == plan_id)
        .ok_or_else(|| AppError::unknown_plan(plan_id))
}

/// All registered plans, `normal` first
#[must_use]
pub fn all() -> &'static [DetoxPlan] {
    REGISTRY
}
