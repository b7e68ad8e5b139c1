// ABOUTME: Metabolic estimates feeding the generation target-calorie input
// ABOUTME: Mifflin-St Jeor BMR and activity-multiplier TDEE
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Metabolic Estimates
//!
//! Basic BMR/TDEE arithmetic from client intake data. These values are what
//! the nutritionist hands to [`crate::generation::PlanGenerator::generate`]
//! as the target-calorie input.
//!
//! BMR uses Mifflin-St Jeor (Mifflin, M.D., et al. (1990). A new predictive
//! equation for resting energy expenditure. *American Journal of Clinical
//! Nutrition*, 51(2), 241-247).

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Sex for the BMR constant term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    /// +5 constant term
    Male,
    /// −161 constant term
    Female,
}

/// Activity level for the TDEE multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// 1-3 days/week
    LightlyActive,
    /// 3-5 days/week
    ModeratelyActive,
    /// 6-7 days/week
    VeryActive,
    /// Hard daily training
    ExtremelyActive,
}

impl ActivityLevel {
    /// TDEE multiplier applied to BMR
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::LightlyActive => 1.375,
            Self::ModeratelyActive => 1.55,
            Self::VeryActive => 1.725,
            Self::ExtremelyActive => 1.9,
        }
    }
}

/// The intake fields the estimates depend on
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BodyMetrics {
    /// Current weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Age in years
    pub age_years: u32,
    /// Sex
    pub sex: Sex,
}

impl BodyMetrics {
    /// Convenience conversion from feet/inches intake fields
    #[must_use]
    pub fn height_cm_from_imperial(feet: u32, inches: u32) -> f64 {
        f64::from(feet) * 30.48 + f64::from(inches) * 2.54
    }
}

/// Basal metabolic rate in kcal/day (Mifflin-St Jeor)
///
/// # Errors
///
/// `InvalidRequest` for non-positive weight or height.
pub fn bmr(metrics: &BodyMetrics) -> AppResult<f64> {
    if metrics.weight_kg <= 0.0 || !metrics.weight_kg.is_finite() {
        return Err(AppError::invalid_request("weight must be positive"));
    }
    if metrics.height_cm <= 0.0 || !metrics.height_cm.is_finite() {
        return Err(AppError::invalid_request("height must be positive"));
    }

    let constant = match metrics.sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };

    Ok(10.0 * metrics.weight_kg + 6.25 * metrics.height_cm - 5.0 * f64::from(metrics.age_years)
        + constant)
}

/// Total daily energy expenditure in kcal/day
#[must_use]
pub fn tdee(bmr_kcal: f64, activity: ActivityLevel) -> f64 {
    bmr_kcal * activity.multiplier()
}
