// ABOUTME: Async contracts for every external collaborator the pipeline consumes
// ABOUTME: Query understanding, content generation, embedding search, record stores, narration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Collaborator Contracts
//!
//! The pipeline never talks to a model, index, or database directly. Each
//! dependency sits behind one of the traits below and reports failures as a
//! [`CollaboratorError`], which the orchestrator matches on to choose the next
//! deterministic fallback. [`with_deadline`] bounds every call.

/// Collaborators backed by an OpenAI-compatible language model
pub mod llm_backed;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hansik_core::models::{NutrientSet, QueryType, RecipeRecord};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use crate::errors::{CollaboratorError, CollaboratorResult};

pub use llm_backed::ModelCollaborator;

/// Service names used in errors and log fields
pub mod service {
    /// Text-understanding collaborator
    pub const QUERY_UNDERSTANDING: &str = "query_understanding";
    /// Recipe and nutrition generator
    pub const CONTENT_GENERATOR: &str = "content_generator";
    /// Embedding similarity index
    pub const EMBEDDING_INDEX: &str = "embedding_index";
    /// Recipe record store
    pub const RECIPE_STORE: &str = "recipe_store";
    /// Nutrition record store
    pub const NUTRITION_STORE: &str = "nutrition_store";
    /// Final response narrator
    pub const RESPONSE_NARRATOR: &str = "response_narrator";
}

// ============================================================================
// Payloads
// ============================================================================

/// Query fields extracted by the understanding collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryInterpretation {
    /// Dish name
    pub food_name: String,
    /// Serving count, when stated
    pub servings: Option<u32>,
    /// Intent, when recognized
    pub query_type: Option<QueryType>,
}

/// Recipe content synthesized by the generator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedRecipe {
    /// Dish name
    pub name: String,
    /// Dish category
    pub category: String,
    /// Cooking method
    pub cooking_method: String,
    /// Ingredient lines
    pub ingredients: Vec<String>,
    /// Cooking steps
    pub steps: Vec<String>,
    /// Cooking tip
    pub tip: String,
}

impl GeneratedRecipe {
    /// Convert into a non-persisted record carrying `image_ref`
    #[must_use]
    pub fn into_record(self, image_ref: String) -> RecipeRecord {
        RecipeRecord {
            id: String::new(),
            name: self.name,
            category: self.category,
            cooking_method: self.cooking_method,
            ingredients: self.ingredients,
            steps: self.steps,
            tip: self.tip,
            image_ref,
            embedded_nutrition: None,
        }
    }
}

/// Nutrition estimate for the whole meal
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedNutrition {
    /// Per-serving gram weight, when estimated
    pub serving_size_g: Option<f64>,
    /// Meal totals (already multiplied by servings)
    pub totals: NutrientSet,
}

/// One embedding neighbor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityHit {
    /// Catalog id of the neighbor
    pub record_id: String,
    /// Dish name of the neighbor
    pub name: String,
    /// `1 / (1 + distance)`, in (0, 1]
    pub similarity: f64,
}

/// Per-serving row from the nutrition store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionRecord {
    /// Food name as stored
    pub food_name: String,
    /// Per-serving gram weight, when known
    pub serving_size_g: Option<f64>,
    /// Per-serving nutrient amounts
    pub per_serving: NutrientSet,
}

// ============================================================================
// Contracts
// ============================================================================

/// Extracts food name, servings, and intent from free text
#[async_trait]
pub trait QueryUnderstanding: Send + Sync {
    /// Interpret a raw query
    async fn analyze(&self, text: &str) -> CollaboratorResult<QueryInterpretation>;
}

/// Synthesizes recipes and nutrition for dishes missing from the stores
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate a recipe; `Ok(None)` means the generator produced nothing
    async fn generate_recipe(
        &self,
        food_name: &str,
        servings: u32,
    ) -> CollaboratorResult<Option<GeneratedRecipe>>;

    /// Estimate meal-total nutrition; `Ok(None)` means no estimate
    async fn generate_nutrition(
        &self,
        food_name: &str,
        servings: u32,
    ) -> CollaboratorResult<Option<GeneratedNutrition>>;
}

/// Nearest-neighbor search over recipe name embeddings
#[async_trait]
pub trait EmbeddingIndex: Send + Sync {
    /// Up to `top_k` neighbors with similarity at least `floor`, best first
    async fn search(
        &self,
        text: &str,
        top_k: usize,
        floor: f64,
    ) -> CollaboratorResult<Vec<SimilarityHit>>;
}

/// Read-only recipe catalog
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Record whose id or name equals `key`
    async fn find_by_id_or_name(&self, key: &str) -> CollaboratorResult<Option<RecipeRecord>>;

    /// Every record in catalog order
    async fn all_records(&self) -> CollaboratorResult<Arc<Vec<RecipeRecord>>>;
}

/// Read-only per-serving nutrition table
#[async_trait]
pub trait NutritionStore: Send + Sync {
    /// Row whose food name equals `food_name`
    async fn find_exact(&self, food_name: &str) -> CollaboratorResult<Option<NutritionRecord>>;

    /// Rows whose food name contains `food_name`, best first
    async fn find_similar(
        &self,
        food_name: &str,
        limit: usize,
    ) -> CollaboratorResult<Vec<NutritionRecord>>;
}

/// Writes the final user-facing answer from a plain-text context
#[async_trait]
pub trait ResponseNarrator: Send + Sync {
    /// Narrate the response; empty output counts as a failure
    async fn narrate(&self, context: &str) -> CollaboratorResult<String>;
}

/// Run a collaborator call under a deadline.
///
/// An elapsed deadline becomes [`CollaboratorError::Timeout`] and the pending
/// call is dropped.
///
/// # Errors
///
/// Returns the call's own error, or `Timeout` when `deadline` elapses first
pub async fn with_deadline<T, F>(
    service: &'static str,
    deadline: Duration,
    call: F,
) -> CollaboratorResult<T>
where
    F: Future<Output = CollaboratorResult<T>> + Send,
{
    timeout(deadline, call)
        .await
        .unwrap_or(Err(CollaboratorError::Timeout {
            service,
            elapsed: deadline,
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_deadline_passes_result_through() {
        let result = with_deadline("stub", Duration::from_secs(1), async { Ok(7) }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn test_deadline_elapsed_is_timeout() {
        let result: CollaboratorResult<()> =
            with_deadline("slow_stub", Duration::from_millis(10), async {
                sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await;
        assert!(matches!(
            result,
            Err(CollaboratorError::Timeout { service: "slow_stub", .. })
        ));
    }

    #[test]
    fn test_generated_recipe_is_not_persisted() {
        let record = GeneratedRecipe {
            name: "김치찌개".to_owned(),
            ..GeneratedRecipe::default()
        }
        .into_record("photo.jpg".to_owned());
        assert!(!record.is_persisted());
        assert_eq!(record.image_ref, "photo.jpg");
    }
}
