// ABOUTME: Prompt templates for the model-backed collaborators, loaded at compile time
// ABOUTME: Query analysis, recipe generation, nutrition estimation, and response narration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! Prompts are loaded from markdown files next to this module. Templates use
//! `{food_name}` and `{servings}` placeholders.

/// System prompt for extracting food name, servings, and intent
pub const QUERY_ANALYZER_PROMPT: &str = include_str!("query_analyzer.md");

/// User prompt template for recipe generation
pub const RECIPE_GENERATION_TEMPLATE: &str = include_str!("recipe_generation.md");

/// User prompt template for meal nutrition estimation
pub const NUTRITION_ESTIMATION_TEMPLATE: &str = include_str!("nutrition_estimation.md");

/// System prompt for the narrated final answer
pub const RESPONSE_NARRATION_PROMPT: &str = include_str!("response_narration.md");

/// System message accompanying recipe generation
pub const RECIPE_SYSTEM_MESSAGE: &str =
    "You are a Korean cuisine expert. Always respond in valid JSON format only.";

/// System message accompanying nutrition estimation
pub const NUTRITION_SYSTEM_MESSAGE: &str =
    "You are a nutrition expert. Always respond in valid JSON format only with numeric values.";

/// Fill a generation template for one dish
#[must_use]
pub fn render(template: &str, food_name: &str, servings: u32) -> String {
    template
        .replace("{food_name}", food_name)
        .replace("{servings}", &servings.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fills_every_placeholder() {
        let prompt = render(NUTRITION_ESTIMATION_TEMPLATE, "잡채", 3);
        assert!(prompt.contains("음식명: 잡채"));
        assert!(prompt.contains("\"servings\": 3"));
        assert!(!prompt.contains("{servings}"));
        assert!(!prompt.contains("{food_name}"));
    }
}
