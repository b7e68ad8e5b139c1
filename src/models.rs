// ABOUTME: Core domain types for the 10-day meal schedule
// ABOUTME: Meal slots, plan days, directives, and the generated anchor grid
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Domain Model
//!
//! A plan covers [`Day::COUNT`] days with nine meal slots per day. The six
//! *constant* slots repeat the same entry across all days unless overridden
//! per day; the three *anchor* slots (breakfast, lunch, dinner) vary per day
//! and are the only slots the generation service populates.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

// ============================================================================
// Meal Slots
// ============================================================================

/// Whether a slot repeats across days or is filled per day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    /// Same value intended to repeat across all plan days
    Constant,
    /// Per-day value, populated by the generation service
    Anchor,
}

/// One of the nine fixed meal times in a plan day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MealSlot {
    /// Constant slot before breakfast preparation begins
    EarlyMorning,
    /// Constant slot immediately before breakfast
    BeforeBreakfast,
    /// Anchor slot
    Breakfast,
    /// Constant slot between breakfast and lunch
    Midday,
    /// Anchor slot
    Lunch,
    /// Constant slot after lunch
    PostLunch,
    /// Constant slot
    Evening,
    /// Anchor slot
    Dinner,
    /// Constant slot
    Bedtime,
}

impl MealSlot {
    /// All nine slots in day order
    pub const ALL: [Self; 9] = [
        Self::EarlyMorning,
        Self::BeforeBreakfast,
        Self::Breakfast,
        Self::Midday,
        Self::Lunch,
        Self::PostLunch,
        Self::Evening,
        Self::Dinner,
        Self::Bedtime,
    ];

    /// The six constant slots
    pub const CONSTANTS: [Self; 6] = [
        Self::EarlyMorning,
        Self::BeforeBreakfast,
        Self::Midday,
        Self::PostLunch,
        Self::Evening,
        Self::Bedtime,
    ];

    /// The three anchor slots
    pub const ANCHORS: [Self; 3] = [Self::Breakfast, Self::Lunch, Self::Dinner];

    /// Slot kind (constant or anchor)
    #[must_use]
    pub const fn kind(self) -> SlotKind {
        match self {
            Self::Breakfast | Self::Lunch | Self::Dinner => SlotKind::Anchor,
            _ => SlotKind::Constant,
        }
    }

    /// Position within [`MealSlot::ALL`], used for cell indexing
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::EarlyMorning => 0,
            Self::BeforeBreakfast => 1,
            Self::Breakfast => 2,
            Self::Midday => 3,
            Self::Lunch => 4,
            Self::PostLunch => 5,
            Self::Evening => 6,
            Self::Dinner => 7,
            Self::Bedtime => 8,
        }
    }

    /// Display name, matching the `mealTime` field of the interpreter wire format
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::EarlyMorning => "Early Morning",
            Self::BeforeBreakfast => "Before Breakfast",
            Self::Breakfast => "Breakfast",
            Self::Midday => "Midday",
            Self::Lunch => "Lunch",
            Self::PostLunch => "Post-Lunch",
            Self::Evening => "Evening",
            Self::Dinner => "Dinner",
            Self::Bedtime => "Bedtime",
        }
    }

    /// Resolve a slot from its wire display name, case-insensitively
    #[must_use]
    pub fn from_display_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|slot| slot.display_name().eq_ignore_ascii_case(name))
    }
}

// ============================================================================
// Plan Days
// ============================================================================

/// A day of the plan, 1-based and bounded to the plan length
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Day(u8);

impl Day {
    /// Number of days in a plan
    pub const COUNT: u8 = 10;

    /// Create a day, rejecting values outside 1..=10
    #[must_use]
    pub fn new(day: u8) -> Option<Self> {
        (1..=Self::COUNT).contains(&day).then_some(Self(day))
    }

    /// Iterate day 1 through day 10
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=Self::COUNT).map(Self)
    }

    /// 1-based day number
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// 0-based index for cell storage
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

// ============================================================================
// Directives
// ============================================================================

/// How a directive combines with the existing cell value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealAction {
    /// Discard prior content
    Replace,
    /// Concatenate onto prior content with `", "`; behaves as replace on an
    /// empty cell
    Append,
}

/// A validated meal-edit directive
///
/// Produced at the boundary from [`RawDirective`]; shapes that fail the
/// day-presence invariant never become a `Directive`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "lowercase")]
pub enum Directive {
    /// Applies the same slot across all plan days
    Constant {
        /// Target slot
        slot: MealSlot,
        /// Food description
        food: String,
        /// Replace or append
        action: MealAction,
    },
    /// Applies to a single (day, slot) cell
    Anchor {
        /// Target slot
        slot: MealSlot,
        /// Target day, 1..=10
        day: Day,
        /// Food description
        food: String,
        /// Replace or append
        action: MealAction,
    },
}

/// Loosely-typed directive as returned by the interpreter backend
///
/// The upstream service is not contract-bound, so every field arrives as
/// free-form JSON and is validated into a [`Directive`] before any merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDirective {
    /// `"constant"` or `"anchor"`
    #[serde(rename = "type")]
    pub scope: String,
    /// Slot display name, e.g. `"Early Morning"`
    #[serde(rename = "mealTime")]
    pub meal_time: String,
    /// Plan day, required iff scope is `"anchor"`
    #[serde(default)]
    pub day: Option<i64>,
    /// Food description
    pub food: String,
    /// `"replace"` or `"append"`; defaults to replace when absent
    #[serde(default)]
    pub action: Option<String>,
}

impl TryFrom<&RawDirective> for Directive {
    type Error = AppError;

    fn try_from(raw: &RawDirective) -> Result<Self, Self::Error> {
        let slot = MealSlot::from_display_name(&raw.meal_time).ok_or_else(|| {
            AppError::invalid_directive(format!("unknown meal time '{}'", raw.meal_time))
        })?;

        let action = match raw.action.as_deref().map(str::trim) {
            None | Some("") | Some("replace") => MealAction::Replace,
            Some("append") => MealAction::Append,
            Some(other) => {
                return Err(AppError::invalid_directive(format!(
                    "unknown action '{other}'"
                )))
            }
        };

        let food = raw.food.trim().to_owned();
        if food.is_empty() {
            return Err(AppError::invalid_directive("empty food description"));
        }

        match raw.scope.trim() {
            "constant" => Ok(Self::Constant { slot, food, action }),
            "anchor" => {
                let day = raw
                    .day
                    .and_then(|d| u8::try_from(d).ok())
                    .and_then(Day::new)
                    .ok_or_else(|| {
                        AppError::invalid_directive(format!(
                            "anchor directive requires a day in 1..={}, got {:?}",
                            Day::COUNT,
                            raw.day
                        ))
                    })?;
                Ok(Self::Anchor {
                    slot,
                    day,
                    food,
                    action,
                })
            }
            other => Err(AppError::invalid_directive(format!(
                "unknown directive scope '{other}'"
            ))),
        }
    }
}

// ============================================================================
// Generated Anchor Grid
// ============================================================================

/// One day's three anchor meals as proposed by the generation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMeals {
    /// Breakfast description
    pub breakfast: String,
    /// Lunch description
    pub lunch: String,
    /// Dinner description
    pub dinner: String,
}

impl DayMeals {
    /// The proposed value for an anchor slot; `None` for constant slots
    #[must_use]
    pub fn for_slot(&self, slot: MealSlot) -> Option<&str> {
        match slot {
            MealSlot::Breakfast => Some(&self.breakfast),
            MealSlot::Lunch => Some(&self.lunch),
            MealSlot::Dinner => Some(&self.dinner),
            _ => None,
        }
    }
}

/// The generation service's proposed 10×3 anchor grid
///
/// Keyed `day1`..`day10` on the wire. This is the *unconstrained* AI
/// proposal: even though detox assignments were sent as a hint, the schedule
/// engine re-applies detox overrides deterministically after loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedAnchorGrid {
    /// Day 1 meals
    pub day1: DayMeals,
    /// Day 2 meals
    pub day2: DayMeals,
    /// Day 3 meals
    pub day3: DayMeals,
    /// Day 4 meals
    pub day4: DayMeals,
    /// Day 5 meals
    pub day5: DayMeals,
    /// Day 6 meals
    pub day6: DayMeals,
    /// Day 7 meals
    pub day7: DayMeals,
    /// Day 8 meals
    pub day8: DayMeals,
    /// Day 9 meals
    pub day9: DayMeals,
    /// Day 10 meals
    pub day10: DayMeals,
}

impl GeneratedAnchorGrid {
    /// The proposed meals for a given plan day
    #[must_use]
    pub fn day(&self, day: Day) -> &DayMeals {
        match day.number() {
            1 => &self.day1,
            2 => &self.day2,
            3 => &self.day3,
            4 => &self.day4,
            5 => &self.day5,
            6 => &self.day6,
            7 => &self.day7,
            8 => &self.day8,
            9 => &self.day9,
            _ => &self.day10,
        }
    }

    /// Iterate `(day, meals)` in day order
    pub fn days(&self) -> impl Iterator<Item = (Day, &DayMeals)> {
        Day::all().map(move |day| (day, self.day(day)))
    }
}
