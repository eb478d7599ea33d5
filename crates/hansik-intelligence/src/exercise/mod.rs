// ABOUTME: Exercise catalog and calorie-matched recommendation engine
// ABOUTME: Static MET table plus tiered selection over it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Exercise Recommendations
//!
//! The catalog is a closed `'static` table, so lookups by key cannot fail at
//! runtime once the catalog tests pass. The recommender turns a meal's energy
//! into minutes of activity for each intensity tier.

/// Static MET catalog
pub mod catalog;
/// Tiered recommendation engine
pub mod recommender;

pub use catalog::EXERCISE_CATALOG;
pub use recommender::{ExerciseRecommender, TierRecommendations, ALTERNATIVES_PER_TIER};
