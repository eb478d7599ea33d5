// ABOUTME: Query analysis stage: model interpretation with a deterministic keyword fallback
// ABOUTME: Extracts food name, serving count, and intent from Korean free text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Query Analysis
//!
//! The understanding collaborator is tried first. Any failure, timeout, or
//! malformed answer falls through to [`parse_with_rules`], which needs no
//! external service and is fully deterministic.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use hansik_core::models::{AnalysisSource, AnalyzedQuery, QueryType};
use regex::Regex;
use tracing::{info, warn};

use crate::collaborators::{service, with_deadline, QueryUnderstanding};

/// Intent keywords, checked in this order
const NUTRITION_KEYWORDS: [&str; 4] = ["칼로리", "영양", "영양소", "성분"];
const EXERCISE_KEYWORDS: [&str; 3] = ["운동", "소모", "태우"];
const RECIPE_KEYWORDS: [&str; 4] = ["레시피", "만드는", "요리법", "조리법"];

struct RulePatterns {
    servings: Regex,
    servings_phrase: Regex,
    request_words: Regex,
    topic_words: Regex,
}

static RULE_PATTERNS: OnceLock<Option<RulePatterns>> = OnceLock::new();

fn rule_patterns() -> Option<&'static RulePatterns> {
    RULE_PATTERNS
        .get_or_init(|| {
            Some(RulePatterns {
                servings: Regex::new(r"(\d+)\s*인분").ok()?,
                servings_phrase: Regex::new(r"\d+\s*인분").ok()?,
                request_words: Regex::new(
                    r"(레시피|만드는\s*법|요리법|조리법|알려줘|알려주세요|만들어줘)",
                )
                .ok()?,
                topic_words: Regex::new(r"(칼로리|영양|운동|소모)").ok()?,
            })
        })
        .as_ref()
}

fn detect_query_type(text: &str) -> QueryType {
    let mentions = |keywords: &[&str]| keywords.iter().any(|keyword| text.contains(keyword));
    if mentions(&NUTRITION_KEYWORDS) {
        QueryType::Nutrition
    } else if mentions(&EXERCISE_KEYWORDS) {
        QueryType::Exercise
    } else if mentions(&RECIPE_KEYWORDS) {
        QueryType::Recipe
    } else {
        QueryType::default()
    }
}

/// Keyword-rule interpretation of a query.
///
/// Servings come from `N인분` (default 1). The food name is the first word
/// left after removing the serving phrase, request words, and topic words.
#[must_use]
pub fn parse_with_rules(text: &str) -> AnalyzedQuery {
    let query_type = detect_query_type(text);
    let Some(patterns) = rule_patterns() else {
        let food_name = text.split_whitespace().next().unwrap_or_default();
        return AnalyzedQuery::new(food_name, 1, query_type, text);
    };

    let servings = patterns
        .servings
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(1);

    let cleaned = patterns.servings_phrase.replace_all(text, "");
    let cleaned = patterns.request_words.replace_all(&cleaned, "");
    let cleaned = patterns.topic_words.replace_all(&cleaned, "");
    let food_name = cleaned.split_whitespace().next().unwrap_or_default();

    AnalyzedQuery::new(food_name, servings, query_type, text)
}

/// Query analysis stage
#[derive(Clone)]
pub struct QueryAnalyzer {
    understanding: Option<Arc<dyn QueryUnderstanding>>,
    deadline: Duration,
}

impl QueryAnalyzer {
    /// Analyzer with an optional understanding collaborator
    #[must_use]
    pub fn new(understanding: Option<Arc<dyn QueryUnderstanding>>, deadline: Duration) -> Self {
        Self {
            understanding,
            deadline,
        }
    }

    /// Interpret `text`, reporting which analyzer produced the result
    pub async fn analyze(&self, text: &str) -> (AnalyzedQuery, AnalysisSource) {
        let Some(understanding) = &self.understanding else {
            return (parse_with_rules(text), AnalysisSource::Rules);
        };

        match with_deadline(
            service::QUERY_UNDERSTANDING,
            self.deadline,
            understanding.analyze(text),
        )
        .await
        {
            Ok(interpretation) => {
                let analyzed = AnalyzedQuery::new(
                    interpretation.food_name,
                    interpretation.servings.unwrap_or(1),
                    interpretation.query_type.unwrap_or_default(),
                    text,
                );
                info!(
                    food_name = %analyzed.food_name,
                    servings = analyzed.servings,
                    query_type = ?analyzed.query_type,
                    "Query analyzed by model"
                );
                (analyzed, AnalysisSource::Model)
            }
            Err(e) => {
                warn!(
                    error.kind = e.kind(),
                    error = %e,
                    "Query understanding failed, using keyword rules"
                );
                (parse_with_rules(text), AnalysisSource::Rules)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_servings_and_food_name() {
        let query = parse_with_rules("김치찌개 2인분 레시피 알려줘");
        assert_eq!(query.food_name, "김치찌개");
        assert_eq!(query.servings, 2);
        assert_eq!(query.query_type, QueryType::Recipe);
    }

    #[test]
    fn test_nutrition_beats_exercise() {
        let query = parse_with_rules("불고기 칼로리 소모 운동");
        assert_eq!(query.query_type, QueryType::Nutrition);
        assert_eq!(query.food_name, "불고기");
    }

    #[test]
    fn test_exercise_intent() {
        let query = parse_with_rules("비빔밥 먹고 운동 얼마나 해야해?");
        assert_eq!(query.query_type, QueryType::Exercise);
        assert_eq!(query.food_name, "비빔밥");
        assert_eq!(query.servings, 1);
    }

    #[test]
    fn test_zero_servings_clamped() {
        assert_eq!(parse_with_rules("된장국 0인분").servings, 1);
    }

    #[test]
    fn test_only_keywords_leaves_empty_name() {
        let query = parse_with_rules("레시피 알려줘");
        assert!(query.food_name.is_empty());
    }
}
