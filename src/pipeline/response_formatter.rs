// ABOUTME: Final answer assembly: optional model narration over a deterministic Korean template
// ABOUTME: Builds the plain-text narration context and the markdown fallback from pipeline state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Response Assembly
//!
//! When a narrator is configured it receives [`build_narration_context`] and
//! writes the answer. Without one, or when it fails or times out, the
//! answer is [`render_template`], which depends only on the state.

use std::sync::Arc;
use std::time::Duration;

use hansik_core::models::Intensity;
use tracing::{info, warn};

use super::state::PipelineState;
use crate::collaborators::{service, with_deadline, ResponseNarrator};

/// Ingredients listed in answers and narration context
const MAX_LISTED_INGREDIENTS: usize = 10;
/// Steps included in the narration context
const MAX_CONTEXT_STEPS: usize = 5;
/// Dish label when neither the recipe nor the query names one
const UNNAMED_FOOD: &str = "음식";
const CLOSING_LINE: &str = "*맛있게 드시고, 건강한 하루 보내세요!* 😊";

const fn tier_emoji(intensity: Intensity) -> &'static str {
    match intensity {
        Intensity::Low => "🚶",
        Intensity::Medium => "🚴",
        Intensity::High => "🏃",
    }
}

/// Deterministic markdown answer
#[must_use]
pub fn render_template(state: &PipelineState) -> String {
    let recipe = &state.resolved_recipe;
    let nutrition = &state.nutrition;
    let servings = state.analyzed_query.servings;
    let food_name = match state.display_food_name() {
        "" => UNNAMED_FOOD,
        name => name,
    };

    let mut parts = vec![format!("## 🍳 {food_name} 정보\n")];

    if !recipe.has_no_content() {
        parts.push(format!("### 📝 레시피 ({servings}인분)"));
        if state.is_generated() {
            parts.push("*AI가 생성한 레시피입니다.*\n".to_owned());
        }
        if !recipe.ingredients.is_empty() {
            parts.push("\n**재료:**".to_owned());
            parts.extend(
                recipe
                    .ingredients
                    .iter()
                    .take(MAX_LISTED_INGREDIENTS)
                    .map(|ingredient| format!("- {ingredient}")),
            );
        }
        if !recipe.steps.is_empty() {
            parts.push("\n**조리법:**".to_owned());
            parts.extend(
                recipe
                    .steps
                    .iter()
                    .enumerate()
                    .map(|(i, step)| format!("{}. {step}", i + 1)),
            );
        }
        if !recipe.tip.is_empty() {
            parts.push(format!("\n💡 **팁:** {}", recipe.tip));
        }
        parts.push(String::new());
    }

    if nutrition.has_energy() {
        let n = &nutrition.nutrients;
        parts.push(format!("### 🥗 영양 정보 ({servings}인분)"));
        parts.push(format!("- 🔥 칼로리: **{:.0}kcal**", n.energy_kcal));
        parts.push(format!("- 🥩 단백질: {:.1}g", n.protein_g));
        parts.push(format!("- 🧈 지방: {:.1}g", n.fat_g));
        parts.push(format!("- 🍚 탄수화물: {:.1}g", n.carbohydrate_g));
        if n.sodium_mg > 0.0 {
            parts.push(format!("- 🧂 나트륨: {:.0}mg", n.sodium_mg));
        }
        parts.push(String::new());
    }

    if !state.exercise_recommendations.is_empty() {
        parts.push("### 🏃 운동 추천".to_owned());
        parts.push(format!(
            "*{:.0}kcal를 소모하기 위한 운동:*\n",
            nutrition.energy_kcal()
        ));
        for recommendation in &state.exercise_recommendations {
            let intensity = recommendation.intensity();
            parts.push(format!(
                "- {} **{}** - {}: 약 {:.0}분",
                tier_emoji(intensity),
                intensity.local_label(),
                recommendation.option.display_name_local,
                recommendation.duration_minutes
            ));
        }
        parts.push(String::new());
    }

    parts.push("---".to_owned());
    parts.push(CLOSING_LINE.to_owned());
    parts.join("\n")
}

/// Plain-text summary of the state handed to the narrator
#[must_use]
pub fn build_narration_context(state: &PipelineState) -> String {
    let query = &state.analyzed_query;
    let recipe = &state.resolved_recipe;
    let nutrition = &state.nutrition;
    let origin = if state.is_generated() {
        "AI 생성"
    } else {
        "데이터베이스"
    };

    let mut parts = vec![
        format!("사용자 질문: {}", state.raw_query),
        format!("음식명: {}", query.food_name),
        format!("인분 수: {}인분", query.servings),
        format!("레시피 출처: {origin}"),
    ];

    if !recipe.name.is_empty() || !recipe.has_no_content() {
        parts.push("\n레시피 정보:".to_owned());
        parts.push(format!("- 음식명: {}", recipe.name));
        parts.push(format!("- 분류: {}", recipe.category));
        parts.push(format!("- 조리방법: {}", recipe.cooking_method));
        if !recipe.ingredients.is_empty() {
            let listed: Vec<&str> = recipe
                .ingredients
                .iter()
                .take(MAX_LISTED_INGREDIENTS)
                .map(String::as_str)
                .collect();
            parts.push(format!("- 재료: {}", listed.join(", ")));
        }
        if !recipe.steps.is_empty() {
            let listed: Vec<&str> = recipe
                .steps
                .iter()
                .take(MAX_CONTEXT_STEPS)
                .map(String::as_str)
                .collect();
            parts.push(format!("- 조리법: {}", listed.join(" ")));
        }
        if !recipe.tip.is_empty() {
            parts.push(format!("- 팁: {}", recipe.tip));
        }
    }

    let n = &nutrition.nutrients;
    parts.push(format!("\n영양 정보 ({}인분):", nutrition.servings));
    parts.push(format!("- 칼로리: {:.0}kcal", n.energy_kcal));
    parts.push(format!("- 단백질: {:.1}g", n.protein_g));
    parts.push(format!("- 지방: {:.1}g", n.fat_g));
    parts.push(format!("- 탄수화물: {:.1}g", n.carbohydrate_g));
    if n.sodium_mg > 0.0 {
        parts.push(format!("- 나트륨: {:.0}mg", n.sodium_mg));
    }

    if !state.exercise_recommendations.is_empty() {
        parts.push(format!(
            "\n운동 추천 (소모 칼로리: {:.0}kcal):",
            n.energy_kcal
        ));
        for recommendation in &state.exercise_recommendations {
            parts.push(format!(
                "- {}: {} ({:.0}분)",
                recommendation.intensity().local_label(),
                recommendation.option.display_name_local,
                recommendation.duration_minutes
            ));
        }
    }

    parts.join("\n")
}

/// Response assembly stage
#[derive(Clone)]
pub struct ResponseFormatter {
    narrator: Option<Arc<dyn ResponseNarrator>>,
    deadline: Duration,
}

impl ResponseFormatter {
    /// Formatter with an optional narrator
    #[must_use]
    pub fn new(narrator: Option<Arc<dyn ResponseNarrator>>, deadline: Duration) -> Self {
        Self { narrator, deadline }
    }

    /// Final answer for `state`
    pub async fn format(&self, state: &PipelineState) -> String {
        let Some(narrator) = &self.narrator else {
            return render_template(state);
        };

        let context = build_narration_context(state);
        match with_deadline(
            service::RESPONSE_NARRATOR,
            self.deadline,
            narrator.narrate(&context),
        )
        .await
        {
            Ok(text) if !text.trim().is_empty() => {
                info!(chars = text.chars().count(), "Narrated response");
                text
            }
            Ok(_) => {
                warn!("Narrator returned nothing, using template");
                render_template(state)
            }
            Err(e) => {
                warn!(
                    error.kind = e.kind(),
                    error = %e,
                    "Narration failed, using template"
                );
                render_template(state)
            }
        }
    }
}
