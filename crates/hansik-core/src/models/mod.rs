// ABOUTME: Domain models flowing through the food query pipeline
// ABOUTME: Profiles, analyzed queries, recipes, nutrition totals, and exercise entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Exercise catalog entries and recommendations
pub mod exercise;
/// Nutrient sets and meal totals
pub mod nutrition;
/// Body profile and its enums
pub mod profile;
/// Analyzed query and intent
pub mod query;
/// Recipe records and resolution tags
pub mod recipe;

pub use exercise::{ExerciseOption, ExerciseRecommendation, Intensity};
pub use nutrition::{MealNutrition, NutrientSet, NutritionSource};
pub use profile::{ActivityLevel, BodyProfile, Sex};
pub use query::{AnalysisSource, AnalyzedQuery, QueryType};
pub use recipe::{MatchTier, RecipeOrigin, RecipeRecord};
