// ABOUTME: Body profile model used by the energy expenditure formulas
// ABOUTME: Validating constructor rejects out-of-range measurements before pipeline entry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{profile_bounds, profile_defaults};
use crate::errors::{AppError, AppResult};

/// Biological sex for the Mifflin-St Jeor offset
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male (+5 kcal offset)
    #[default]
    Male,
    /// Female (-161 kcal offset)
    Female,
}

impl FromStr for Sex {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "남" | "남성" => Ok(Self::Male),
            "female" | "f" | "여" | "여성" => Ok(Self::Female),
            other => Err(AppError::invalid_input(format!("unknown sex: {other}"))),
        }
    }
}

/// Habitual activity level for TDEE
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    #[default]
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise or twice-daily training
    VeryActive,
}

impl ActivityLevel {
    /// Stable snake-case label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "very_active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "sedentary" => Ok(Self::Sedentary),
            "light" => Ok(Self::Light),
            "moderate" => Ok(Self::Moderate),
            "active" => Ok(Self::Active),
            "very_active" => Ok(Self::VeryActive),
            other => Err(AppError::invalid_input(format!(
                "unknown activity level: {other}"
            ))),
        }
    }
}

/// Per-request body measurements.
///
/// Fields are private so every instance has passed [`BodyProfile::new`]; the
/// energy formulas rely on measurements inside [`profile_bounds`].
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct BodyProfile {
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    sex: Sex,
    activity_level: ActivityLevel,
}

impl BodyProfile {
    /// Build a validated profile
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when weight or height is not finite, and
    /// `ValueOutOfRange` when a measurement falls outside [`profile_bounds`].
    pub fn new(
        weight_kg: f64,
        height_cm: f64,
        age_years: u32,
        sex: Sex,
        activity_level: ActivityLevel,
    ) -> AppResult<Self> {
        if !weight_kg.is_finite() || !height_cm.is_finite() {
            return Err(AppError::invalid_input(format!(
                "weight_kg and height_cm must be finite, got {weight_kg} and {height_cm}"
            )));
        }
        if !(profile_bounds::MIN_WEIGHT_KG..=profile_bounds::MAX_WEIGHT_KG).contains(&weight_kg) {
            return Err(AppError::out_of_range(format!(
                "weight_kg must be within {}..={}, got {weight_kg}",
                profile_bounds::MIN_WEIGHT_KG,
                profile_bounds::MAX_WEIGHT_KG
            )));
        }
        if !(profile_bounds::MIN_HEIGHT_CM..=profile_bounds::MAX_HEIGHT_CM).contains(&height_cm) {
            return Err(AppError::out_of_range(format!(
                "height_cm must be within {}..={}, got {height_cm}",
                profile_bounds::MIN_HEIGHT_CM,
                profile_bounds::MAX_HEIGHT_CM
            )));
        }
        if !(profile_bounds::MIN_AGE_YEARS..=profile_bounds::MAX_AGE_YEARS).contains(&age_years) {
            return Err(AppError::out_of_range(format!(
                "age_years must be within {}..={}, got {age_years}",
                profile_bounds::MIN_AGE_YEARS,
                profile_bounds::MAX_AGE_YEARS
            )));
        }
        Ok(Self {
            weight_kg,
            height_cm,
            age_years,
            sex,
            activity_level,
        })
    }

    /// Body weight in kilograms
    #[must_use]
    pub const fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Height in centimeters
    #[must_use]
    pub const fn height_cm(&self) -> f64 {
        self.height_cm
    }

    /// Age in whole years
    #[must_use]
    pub const fn age_years(&self) -> u32 {
        self.age_years
    }

    /// Sex used for the BMR offset
    #[must_use]
    pub const fn sex(&self) -> Sex {
        self.sex
    }

    /// Activity level used for TDEE
    #[must_use]
    pub const fn activity_level(&self) -> ActivityLevel {
        self.activity_level
    }
}

impl Default for BodyProfile {
    fn default() -> Self {
        Self {
            weight_kg: profile_defaults::WEIGHT_KG,
            height_cm: profile_defaults::HEIGHT_CM,
            age_years: profile_defaults::AGE_YEARS,
            sex: Sex::Male,
            activity_level: ActivityLevel::Moderate,
        }
    }
}

/// Unvalidated profile shape, as received from a caller
#[derive(Debug, Clone, Copy, Deserialize)]
struct RawBodyProfile {
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    #[serde(default)]
    sex: Sex,
    #[serde(default)]
    activity_level: ActivityLevel,
}

impl TryFrom<RawBodyProfile> for BodyProfile {
    type Error = AppError;

    fn try_from(raw: RawBodyProfile) -> Result<Self, Self::Error> {
        Self::new(
            raw.weight_kg,
            raw.height_cm,
            raw.age_years,
            raw.sex,
            raw.activity_level,
        )
    }
}

impl<'de> Deserialize<'de> for BodyProfile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawBodyProfile::deserialize(deserializer)?;
        Self::try_from(raw).map_err(D::Error::custom)
    }
}
