// ABOUTME: Energy expenditure model: BMR, TDEE, and MET-based exercise calories
// ABOUTME: Pure functions over a validated body profile, rounded to one decimal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Energy Model
//!
//! Closed-form physiology used to turn a meal's calories into exercise time.
//!
//! ## Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//!
//! - Ainsworth, B.E., et al. (2011). 2011 Compendium of Physical Activities.
//!   *Medicine & Science in Sports & Exercise*, 43(8), 1575-1581.
//!   <https://doi.org/10.1249/MSS.0b013e31821ece12>
//!
//! ## Rounding
//!
//! Every public result is rounded to one decimal place. `duration_for_calories`
//! followed by `calories_burned` on the rounded duration does not return the
//! original target exactly; the difference is bounded by one tenth of a minute
//! of activity.

use hansik_core::models::{BodyProfile, Intensity, Sex};
use hansik_core::precision::round_to_tenth;
use serde::{Deserialize, Serialize};

use crate::config::EnergyConfig;

/// Minutes per hour
const MINUTES_PER_HOUR: f64 = 60.0;

/// Resting and daily energy expenditure for a profile
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailyEnergy {
    /// Basal metabolic rate (kcal/day)
    pub bmr_kcal: f64,
    /// Total daily energy expenditure (kcal/day)
    pub tdee_kcal: f64,
}

/// Stateless energy expenditure calculator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnergyModel {
    config: EnergyConfig,
}

impl EnergyModel {
    /// Create a model with custom coefficients
    #[must_use]
    pub const fn new(config: EnergyConfig) -> Self {
        Self { config }
    }

    /// Coefficients in use
    #[must_use]
    pub const fn config(&self) -> &EnergyConfig {
        &self.config
    }

    /// Basal metabolic rate, Mifflin-St Jeor (kcal/day)
    ///
    /// `10 x weight_kg + 6.25 x height_cm - 5 x age + (5 | -161)`
    #[must_use]
    pub fn bmr(&self, profile: &BodyProfile) -> f64 {
        let coef = &self.config.bmr;
        let sex_constant = match profile.sex() {
            Sex::Male => coef.msj_male_constant,
            Sex::Female => coef.msj_female_constant,
        };
        round_to_tenth(
            coef.msj_weight_coef * profile.weight_kg()
                + coef.msj_height_coef * profile.height_cm()
                + coef.msj_age_coef * f64::from(profile.age_years())
                + sex_constant,
        )
    }

    /// Total daily energy expenditure: rounded BMR times the activity factor
    #[must_use]
    pub fn tdee(&self, profile: &BodyProfile) -> f64 {
        let factor = self
            .config
            .activity_factors
            .factor(profile.activity_level());
        round_to_tenth(self.bmr(profile) * factor)
    }

    /// BMR and TDEE together
    #[must_use]
    pub fn daily_energy(&self, profile: &BodyProfile) -> DailyEnergy {
        DailyEnergy {
            bmr_kcal: self.bmr(profile),
            tdee_kcal: self.tdee(profile),
        }
    }

    /// Calories burned by `duration_minutes` of an activity
    ///
    /// `met x weight_kg x hours x (1 + epoc)`
    #[must_use]
    pub fn calories_burned(
        &self,
        met: f64,
        weight_kg: f64,
        duration_minutes: f64,
        intensity: Intensity,
    ) -> f64 {
        let epoc = self.config.epoc.factor(intensity);
        round_to_tenth(met * weight_kg * (duration_minutes / MINUTES_PER_HOUR) * (1.0 + epoc))
    }

    /// Minutes of an activity needed to burn `target_calories`
    ///
    /// Callers guarantee `met > 0` and `weight_kg > 0`: catalog entries are
    /// checked at load and profiles are validated on construction.
    #[must_use]
    pub fn duration_for_calories(
        &self,
        met: f64,
        weight_kg: f64,
        target_calories: f64,
        intensity: Intensity,
    ) -> f64 {
        debug_assert!(
            met > 0.0 && weight_kg > 0.0,
            "met and weight_kg must be positive"
        );
        let epoc = self.config.epoc.factor(intensity);
        round_to_tenth(target_calories / (met * weight_kg * (1.0 + epoc)) * MINUTES_PER_HOUR)
    }
}
