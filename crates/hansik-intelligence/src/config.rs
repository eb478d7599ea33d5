// ABOUTME: Coefficient configuration for the energy expenditure model
// ABOUTME: BMR formula constants, TDEE activity factors, and EPOC surcharges by tier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use hansik_core::models::{ActivityLevel, Intensity};
use serde::{Deserialize, Serialize};

/// Mifflin-St Jeor coefficients
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
/// American Journal of Clinical Nutrition, 51(2), 241-247. DOI: 10.1093/ajcn/51.2.241
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BmrConfig {
    /// Weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Male constant (+5)
    pub msj_male_constant: f64,
    /// Female constant (-161)
    pub msj_female_constant: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
        }
    }
}

/// Activity factor multipliers for TDEE calculation
///
/// Reference: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityFactorsConfig {
    /// Sedentary: 1.2
    pub sedentary: f64,
    /// Light: 1.375
    pub light: f64,
    /// Moderate: 1.55
    pub moderate: f64,
    /// Active: 1.725
    pub active: f64,
    /// Very active: 1.9
    pub very_active: f64,
}

impl ActivityFactorsConfig {
    /// Multiplier for an activity level
    #[must_use]
    pub const fn factor(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::Light => self.light,
            ActivityLevel::Moderate => self.moderate,
            ActivityLevel::Active => self.active,
            ActivityLevel::VeryActive => self.very_active,
        }
    }
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            light: 1.375,
            moderate: 1.55,
            active: 1.725,
            very_active: 1.9,
        }
    }
}

/// Excess post-exercise oxygen consumption surcharge per intensity tier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EpocConfig {
    /// Low intensity: +5%
    pub low: f64,
    /// Medium intensity: +10%
    pub medium: f64,
    /// High intensity: +15%
    pub high: f64,
}

impl EpocConfig {
    /// Surcharge fraction for a tier
    #[must_use]
    pub const fn factor(&self, intensity: Intensity) -> f64 {
        match intensity {
            Intensity::Low => self.low,
            Intensity::Medium => self.medium,
            Intensity::High => self.high,
        }
    }
}

impl Default for EpocConfig {
    fn default() -> Self {
        Self {
            low: 0.05,
            medium: 0.10,
            high: 0.15,
        }
    }
}

/// Full coefficient set for [`crate::algorithms::EnergyModel`]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EnergyConfig {
    /// BMR formula coefficients
    pub bmr: BmrConfig,
    /// TDEE multipliers
    pub activity_factors: ActivityFactorsConfig,
    /// EPOC surcharges
    pub epoc: EpocConfig,
}
