// ABOUTME: Typed per-request state threaded through every pipeline stage
// ABOUTME: One instance per request with a single writer, returned to the caller at the end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use hansik_core::models::{
    AnalysisSource, AnalyzedQuery, BodyProfile, ExerciseRecommendation, MatchTier, MealNutrition,
    QueryType, RecipeOrigin, RecipeRecord,
};
use hansik_intelligence::DailyEnergy;
use serde::Serialize;
use uuid::Uuid;

/// Everything known about one request, filled in stage by stage
#[derive(Debug, Clone, Serialize)]
pub struct PipelineState {
    /// Correlation id, also recorded on the request's tracing span
    pub request_id: Uuid,
    /// Query text as received
    pub raw_query: String,
    /// Profile used for the energy calculations
    pub body_profile: BodyProfile,
    /// Query interpretation
    pub analyzed_query: AnalyzedQuery,
    /// Which analyzer produced `analyzed_query`
    pub analysis_source: AnalysisSource,
    /// Catalog match, placeholder, or generated recipe
    pub resolved_recipe: RecipeRecord,
    /// How `resolved_recipe` was obtained
    pub recipe_origin: RecipeOrigin,
    /// Resolver tier of a catalog match
    pub match_tier: Option<MatchTier>,
    /// Meal-total nutrition
    pub nutrition: MealNutrition,
    /// One recommendation per tier, low to high; empty without energy
    pub exercise_recommendations: Vec<ExerciseRecommendation>,
    /// BMR and TDEE of `body_profile`
    pub daily_energy: Option<DailyEnergy>,
    /// Final user-facing answer
    pub response: String,
    /// Informational error; never aborts the pipeline
    pub error: Option<String>,
}

impl PipelineState {
    /// Initial state for a request
    pub fn new(raw_query: impl Into<String>, body_profile: BodyProfile) -> Self {
        let raw_query = raw_query.into();
        Self {
            request_id: Uuid::new_v4(),
            analyzed_query: AnalyzedQuery::new(String::new(), 1, QueryType::Recipe, &*raw_query),
            raw_query,
            body_profile,
            analysis_source: AnalysisSource::default(),
            resolved_recipe: RecipeRecord::default(),
            recipe_origin: RecipeOrigin::default(),
            match_tier: None,
            nutrition: MealNutrition::default(),
            exercise_recommendations: Vec::new(),
            daily_energy: None,
            response: String::new(),
            error: None,
        }
    }

    /// Dish name to report: the recipe's name, else the analyzed food name
    #[must_use]
    pub fn display_food_name(&self) -> &str {
        if self.resolved_recipe.name.is_empty() {
            &self.analyzed_query.food_name
        } else {
            &self.resolved_recipe.name
        }
    }

    /// Whether the recipe came from the generator rather than the catalog
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.recipe_origin == RecipeOrigin::Generated
    }
}
