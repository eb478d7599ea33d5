// ABOUTME: Physiological algorithms used by the recommender
// ABOUTME: Currently the Mifflin-St Jeor / MET energy model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// BMR, TDEE, and exercise calorie conversions
pub mod energy;

pub use energy::{DailyEnergy, EnergyModel};
