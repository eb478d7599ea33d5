// ABOUTME: Exercise catalog entry and per-request recommendation models
// ABOUTME: Intensity tiers order low < medium < high for deterministic output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Exercise intensity tier
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    /// Light effort
    Low,
    /// Moderate effort
    Medium,
    /// Vigorous effort
    High,
}

impl Intensity {
    /// All tiers in ascending order
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Stable snake-case label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Korean tier label
    #[must_use]
    pub const fn local_label(&self) -> &'static str {
        match self {
            Self::Low => "저강도",
            Self::Medium => "중강도",
            Self::High => "고강도",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(AppError::invalid_input(format!("unknown intensity: {other}"))),
        }
    }
}

/// Static MET catalog entry
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ExerciseOption {
    /// Stable key, e.g. `walking_moderate`
    pub canonical_key: &'static str,
    /// English display name
    pub display_name_en: &'static str,
    /// Korean display name
    pub display_name_local: &'static str,
    /// Metabolic equivalent of task
    pub met: f64,
    /// Intensity tier
    pub intensity: Intensity,
    /// Short description
    pub description: &'static str,
    /// Practical tip
    pub tip: &'static str,
}

/// Activity duration needed to burn a calorie target
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ExerciseRecommendation {
    /// Catalog entry
    pub option: &'static ExerciseOption,
    /// Minutes of activity, one decimal
    pub duration_minutes: f64,
    /// Calories burned over `duration_minutes`, one decimal
    pub calories_burned: f64,
}

impl ExerciseRecommendation {
    /// Tier of the recommended activity
    #[must_use]
    pub const fn intensity(&self) -> Intensity {
        self.option.intensity
    }
}
