// ABOUTME: Query understanding, generation, and narration backed by a chat-completion model
// ABOUTME: Builds prompts, applies sampling settings, and parses JSON payloads defensively
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use async_trait::async_trait;
use hansik_core::models::{NutrientSet, QueryType};
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::{
    service, ContentGenerator, GeneratedNutrition, GeneratedRecipe, QueryInterpretation,
    QueryUnderstanding, ResponseNarrator,
};
use crate::errors::{AppError, CollaboratorError, CollaboratorResult, ErrorCode};
use crate::llm::prompts::{
    self, NUTRITION_ESTIMATION_TEMPLATE, NUTRITION_SYSTEM_MESSAGE, QUERY_ANALYZER_PROMPT,
    RECIPE_GENERATION_TEMPLATE, RECIPE_SYSTEM_MESSAGE, RESPONSE_NARRATION_PROMPT,
};
use crate::llm::{extract_json_object, ChatMessage, ChatRequest, LlmProvider};

/// Category assigned when a generated recipe omits one
pub const DEFAULT_GENERATED_CATEGORY: &str = "기타";

/// Sampling settings for one kind of model call
#[derive(Debug, Clone, Copy)]
struct Sampling {
    temperature: f32,
    max_tokens: u32,
}

const ANALYSIS: Sampling = Sampling {
    temperature: 0.0,
    max_tokens: 200,
};
const RECIPE_GENERATION: Sampling = Sampling {
    temperature: 0.7,
    max_tokens: 1500,
};
const NUTRITION_ESTIMATION: Sampling = Sampling {
    temperature: 0.5,
    max_tokens: 500,
};
const NARRATION: Sampling = Sampling {
    temperature: 0.7,
    max_tokens: 2000,
};

/// Implements the model-facing collaborator traits over one provider
#[derive(Clone)]
pub struct ModelCollaborator {
    provider: Arc<dyn LlmProvider>,
}

impl ModelCollaborator {
    /// Wrap a chat provider
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    async fn chat(
        &self,
        service: &'static str,
        system: &str,
        user: String,
        sampling: Sampling,
    ) -> CollaboratorResult<String> {
        let request = ChatRequest::new(vec![ChatMessage::system(system), ChatMessage::user(user)])
            .with_temperature(sampling.temperature)
            .with_max_tokens(sampling.max_tokens);
        let response = self
            .provider
            .complete(&request)
            .await
            .map_err(|e| to_collaborator_error(service, &e))?;
        debug!(service, model = %response.model, "Model call completed");
        Ok(response.content)
    }
}

/// Classify a provider error for the pipeline
fn to_collaborator_error(service: &'static str, error: &AppError) -> CollaboratorError {
    match error.code {
        ErrorCode::ExternalServiceUnavailable => CollaboratorError::Unavailable { service },
        _ => CollaboratorError::failed(service, error),
    }
}

fn string_field(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| map.get(*key))
        .and_then(Value::as_str)
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

/// Numeric field that may arrive as a JSON number or a numeric string
fn number_field(map: &Map<String, Value>, key: &str) -> Option<f64> {
    match map.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|value: &f64| value.is_finite())
}

fn list_field(map: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .find_map(|key| map.get(*key))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.trim().to_owned(),
                    other => other.to_string(),
                })
                .filter(|line| !line.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Parse the analyzer's JSON answer
///
/// # Errors
///
/// Returns `Malformed` when no object is present or `food_name` is missing
pub fn parse_interpretation(content: &str) -> CollaboratorResult<QueryInterpretation> {
    let map = extract_json_object(content).ok_or_else(|| {
        CollaboratorError::malformed(service::QUERY_UNDERSTANDING, "no JSON object in output")
    })?;
    let food_name = string_field(&map, &["food_name"]).ok_or_else(|| {
        CollaboratorError::malformed(service::QUERY_UNDERSTANDING, "missing food_name")
    })?;
    let servings = number_field(&map, "servings")
        .filter(|n| *n >= 1.0)
        .map(|n| n.round() as u32);
    let query_type = string_field(&map, &["query_type"]).map(|s| QueryType::from_str_lossy(&s));
    Ok(QueryInterpretation {
        food_name,
        servings,
        query_type,
    })
}

/// Parse a generated recipe, defaulting missing fields
///
/// # Errors
///
/// Returns `Malformed` when the output holds no JSON object
pub fn parse_generated_recipe(
    content: &str,
    requested_name: &str,
) -> CollaboratorResult<Option<GeneratedRecipe>> {
    if content.trim().is_empty() {
        return Ok(None);
    }
    let map = extract_json_object(content).ok_or_else(|| {
        CollaboratorError::malformed(service::CONTENT_GENERATOR, "no JSON object in recipe")
    })?;
    Ok(Some(GeneratedRecipe {
        name: string_field(&map, &["name"]).unwrap_or_else(|| requested_name.to_owned()),
        category: string_field(&map, &["category"])
            .unwrap_or_else(|| DEFAULT_GENERATED_CATEGORY.to_owned()),
        cooking_method: string_field(&map, &["cooking_method"]).unwrap_or_default(),
        ingredients: list_field(&map, &["ingredients"]),
        steps: list_field(&map, &["instructions", "steps"]),
        tip: string_field(&map, &["tips", "tip"]).unwrap_or_default(),
    }))
}

/// Parse a meal-total nutrition estimate; absent or invalid numbers become zero
///
/// # Errors
///
/// Returns `Malformed` when the output holds no JSON object
pub fn parse_generated_nutrition(content: &str) -> CollaboratorResult<Option<GeneratedNutrition>> {
    if content.trim().is_empty() {
        return Ok(None);
    }
    let map = extract_json_object(content).ok_or_else(|| {
        CollaboratorError::malformed(service::CONTENT_GENERATOR, "no JSON object in nutrition")
    })?;
    let amount = |key: &str| number_field(&map, key).unwrap_or(0.0);
    let totals = NutrientSet {
        energy_kcal: amount("calories"),
        protein_g: amount("protein"),
        fat_g: amount("fat"),
        carbohydrate_g: amount("carbohydrate"),
        sugar_g: amount("sugar"),
        fiber_g: amount("fiber"),
        sodium_mg: amount("sodium"),
        ..NutrientSet::default()
    }
    .sanitized();
    Ok(Some(GeneratedNutrition {
        serving_size_g: number_field(&map, "serving_size").filter(|size| *size > 0.0),
        totals,
    }))
}

#[async_trait]
impl QueryUnderstanding for ModelCollaborator {
    async fn analyze(&self, text: &str) -> CollaboratorResult<QueryInterpretation> {
        let content = self
            .chat(
                service::QUERY_UNDERSTANDING,
                QUERY_ANALYZER_PROMPT,
                text.to_owned(),
                ANALYSIS,
            )
            .await?;
        parse_interpretation(&content)
    }
}

#[async_trait]
impl ContentGenerator for ModelCollaborator {
    async fn generate_recipe(
        &self,
        food_name: &str,
        servings: u32,
    ) -> CollaboratorResult<Option<GeneratedRecipe>> {
        info!(food_name, servings, "Generating recipe");
        let content = self
            .chat(
                service::CONTENT_GENERATOR,
                RECIPE_SYSTEM_MESSAGE,
                prompts::render(RECIPE_GENERATION_TEMPLATE, food_name, servings),
                RECIPE_GENERATION,
            )
            .await?;
        parse_generated_recipe(&content, food_name)
    }

    async fn generate_nutrition(
        &self,
        food_name: &str,
        servings: u32,
    ) -> CollaboratorResult<Option<GeneratedNutrition>> {
        info!(food_name, servings, "Estimating nutrition");
        let content = self
            .chat(
                service::CONTENT_GENERATOR,
                NUTRITION_SYSTEM_MESSAGE,
                prompts::render(NUTRITION_ESTIMATION_TEMPLATE, food_name, servings),
                NUTRITION_ESTIMATION,
            )
            .await?;
        parse_generated_nutrition(&content)
    }
}

#[async_trait]
impl ResponseNarrator for ModelCollaborator {
    async fn narrate(&self, context: &str) -> CollaboratorResult<String> {
        let content = self
            .chat(
                service::RESPONSE_NARRATOR,
                RESPONSE_NARRATION_PROMPT,
                context.to_owned(),
                NARRATION,
            )
            .await?;
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(CollaboratorError::malformed(
                service::RESPONSE_NARRATOR,
                "empty narration",
            ));
        }
        Ok(trimmed.to_owned())
    }
}
