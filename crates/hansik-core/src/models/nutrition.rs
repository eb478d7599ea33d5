// ABOUTME: Nutrient set and meal-total nutrition models with serving scaling
// ABOUTME: Field aliases accept the nutrition table and recipe catalog column names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::nutrition::DEFAULT_SERVING_SIZE_G;
use crate::precision::round_to_tenth;

/// Fixed set of nutrient amounts, all non-negative
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct NutrientSet {
    /// Energy (kcal)
    #[serde(default, alias = "calories")]
    pub energy_kcal: f64,
    /// Protein (g)
    #[serde(default, alias = "protein")]
    pub protein_g: f64,
    /// Fat (g)
    #[serde(default, alias = "fat")]
    pub fat_g: f64,
    /// Carbohydrate (g)
    #[serde(default, alias = "carbohydrate")]
    pub carbohydrate_g: f64,
    /// Sugars (g)
    #[serde(default, alias = "sugar")]
    pub sugar_g: f64,
    /// Dietary fiber (g)
    #[serde(default, alias = "fiber")]
    pub fiber_g: f64,
    /// Sodium (mg)
    #[serde(default, alias = "sodium")]
    pub sodium_mg: f64,
    /// Calcium (mg)
    #[serde(default, alias = "calcium")]
    pub calcium_mg: f64,
    /// Iron (mg)
    #[serde(default, alias = "iron")]
    pub iron_mg: f64,
    /// Potassium (mg)
    #[serde(default, alias = "potassium")]
    pub potassium_mg: f64,
    /// Vitamin A (µg RAE)
    #[serde(default, alias = "vitamin_a")]
    pub vitamin_a_ug: f64,
    /// Vitamin C (mg)
    #[serde(default, alias = "vitamin_c")]
    pub vitamin_c_mg: f64,
    /// Cholesterol (mg)
    #[serde(default, alias = "cholesterol")]
    pub cholesterol_mg: f64,
}

impl NutrientSet {
    /// Apply `f` to every field
    #[must_use]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            energy_kcal: f(self.energy_kcal),
            protein_g: f(self.protein_g),
            fat_g: f(self.fat_g),
            carbohydrate_g: f(self.carbohydrate_g),
            sugar_g: f(self.sugar_g),
            fiber_g: f(self.fiber_g),
            sodium_mg: f(self.sodium_mg),
            calcium_mg: f(self.calcium_mg),
            iron_mg: f(self.iron_mg),
            potassium_mg: f(self.potassium_mg),
            vitamin_a_ug: f(self.vitamin_a_ug),
            vitamin_c_mg: f(self.vitamin_c_mg),
            cholesterol_mg: f(self.cholesterol_mg),
        }
    }

    /// Multiply every field by `servings`, rounding each to one decimal place
    #[must_use]
    pub fn scaled(self, servings: u32) -> Self {
        let factor = f64::from(servings);
        self.map(|value| round_to_tenth(value * factor))
    }

    /// Replace negative or non-finite amounts with zero
    #[must_use]
    pub fn sanitized(self) -> Self {
        self.map(|value| if value.is_finite() && value > 0.0 { value } else { 0.0 })
    }

    /// Whether every field is zero
    #[must_use]
    pub fn is_all_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Where the resolved meal nutrition came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NutritionSource {
    /// Values embedded in the recipe record
    Recipe,
    /// Exact food-name row in the nutrition store
    StoreExact,
    /// Best similar row in the nutrition store
    StoreSimilar,
    /// Estimate from the generative collaborator
    Generated,
    /// Nothing found
    #[default]
    Unknown,
}

/// Nutrition totals for the whole meal (all servings)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealNutrition {
    /// Food the values describe
    pub food_name: String,
    /// Serving count the totals cover
    pub servings: u32,
    /// Total gram weight (per-serving size times servings)
    pub serving_size_g: f64,
    /// Nutrient totals
    pub nutrients: NutrientSet,
    /// Provenance
    pub source: NutritionSource,
}

impl MealNutrition {
    /// All-zero terminal value meaning "nutrition unknown"
    pub fn unknown(food_name: impl Into<String>, servings: u32) -> Self {
        Self {
            food_name: food_name.into(),
            servings,
            serving_size_g: 0.0,
            nutrients: NutrientSet::default(),
            source: NutritionSource::Unknown,
        }
    }

    /// Scale per-serving values up to a meal total
    pub fn from_per_serving(
        food_name: impl Into<String>,
        servings: u32,
        serving_size_g: Option<f64>,
        per_serving: NutrientSet,
        source: NutritionSource,
    ) -> Self {
        let size = serving_size_g
            .filter(|size| *size > 0.0)
            .unwrap_or(DEFAULT_SERVING_SIZE_G);
        Self {
            food_name: food_name.into(),
            servings,
            serving_size_g: size * f64::from(servings),
            nutrients: per_serving.sanitized().scaled(servings),
            source,
        }
    }

    /// Total energy in kcal
    #[must_use]
    pub const fn energy_kcal(&self) -> f64 {
        self.nutrients.energy_kcal
    }

    /// Whether the energy total is usable for exercise matching
    #[must_use]
    pub fn has_energy(&self) -> bool {
        self.nutrients.energy_kcal > 0.0
    }
}

impl Default for MealNutrition {
    fn default() -> Self {
        Self::unknown(String::new(), 1)
    }
}
