// ABOUTME: Analyzed query model produced once per request by query analysis
// ABOUTME: Food name, serving count, and intent extracted from free text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// What the user is mainly asking about
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    /// How to cook the dish
    #[default]
    Recipe,
    /// Calories and nutrients of the dish
    Nutrition,
    /// Exercise needed to burn the dish off
    Exercise,
    /// Anything else
    General,
}

impl QueryType {
    /// Parse a model-provided label, falling back to `Recipe`
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "nutrition" => Self::Nutrition,
            "exercise" => Self::Exercise,
            "general" => Self::General,
            _ => Self::Recipe,
        }
    }
}

/// Which analyzer produced the query interpretation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    /// Text-understanding collaborator
    Model,
    /// Deterministic keyword rules
    #[default]
    Rules,
}

/// Interpretation of the raw query text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzedQuery {
    /// Dish mentioned in the query (may be empty)
    pub food_name: String,
    /// Number of servings, always at least one
    pub servings: u32,
    /// Query intent
    pub query_type: QueryType,
    /// Query text as received
    pub original_text: String,
}

impl AnalyzedQuery {
    /// Build an analyzed query, clamping servings to at least one
    pub fn new(
        food_name: impl Into<String>,
        servings: u32,
        query_type: QueryType,
        original_text: impl Into<String>,
    ) -> Self {
        Self {
            food_name: food_name.into(),
            servings: servings.max(1),
            query_type,
            original_text: original_text.into(),
        }
    }
}

impl Default for AnalyzedQuery {
    fn default() -> Self {
        Self::new(String::new(), 1, QueryType::Recipe, String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_servings_clamped_to_one() {
        let query = AnalyzedQuery::new("비빔밥", 0, QueryType::Recipe, "비빔밥 0인분");
        assert_eq!(query.servings, 1);
    }

    #[test]
    fn test_lossy_query_type() {
        assert_eq!(QueryType::from_str_lossy("Nutrition"), QueryType::Nutrition);
        assert_eq!(QueryType::from_str_lossy("unknown"), QueryType::Recipe);
    }
}
