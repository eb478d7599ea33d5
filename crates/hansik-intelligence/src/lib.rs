// ABOUTME: Energy expenditure algorithms and exercise recommendation engine
// ABOUTME: Pure computation over validated profiles, no I/O
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Hansik Intelligence
//!
//! Physiology for the food query pipeline:
//!
//! - **algorithms**: [`EnergyModel`] (BMR, TDEE, MET calorie conversions)
//! - **exercise**: the MET catalog and [`ExerciseRecommender`]
//! - **config**: formula coefficients with literature defaults

/// Physiological algorithms
pub mod algorithms;

/// Formula coefficients
pub mod config;

/// Exercise catalog and recommender
pub mod exercise;

pub use algorithms::{DailyEnergy, EnergyModel};
pub use config::EnergyConfig;
pub use exercise::{ExerciseRecommender, TierRecommendations};
