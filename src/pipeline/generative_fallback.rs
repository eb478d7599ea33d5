// ABOUTME: Generative fallback for dishes the catalog and nutrition store cannot answer
// ABOUTME: Fills empty placeholder recipes and replaces all-zero nutrition with estimates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Duration;

use hansik_core::constants::nutrition::DEFAULT_SERVING_SIZE_G;
use hansik_core::models::{MealNutrition, NutritionSource, RecipeRecord};
use hansik_core::precision::round_to_tenth;
use tracing::{debug, info, warn};

use crate::collaborators::{service, with_deadline, ContentGenerator, GeneratedNutrition};

/// Generative fallback stage
#[derive(Clone)]
pub struct GenerativeFallback {
    generator: Option<Arc<dyn ContentGenerator>>,
    deadline: Duration,
}

impl GenerativeFallback {
    /// Fallback over an optional content generator
    #[must_use]
    pub fn new(generator: Option<Arc<dyn ContentGenerator>>, deadline: Duration) -> Self {
        Self {
            generator,
            deadline,
        }
    }

    /// Fill `placeholder` with a generated recipe.
    ///
    /// Only placeholders with neither ingredients nor steps are filled. The
    /// result is never persisted and keeps the placeholder's image reference.
    /// Any generator failure returns the placeholder unchanged.
    pub async fn complete_recipe(
        &self,
        placeholder: RecipeRecord,
        food_name: &str,
        servings: u32,
    ) -> RecipeRecord {
        if food_name.is_empty() || !placeholder.has_no_content() {
            return placeholder;
        }
        let Some(generator) = &self.generator else {
            debug!(food_name, "No content generator configured");
            return placeholder;
        };

        match with_deadline(
            service::CONTENT_GENERATOR,
            self.deadline,
            generator.generate_recipe(food_name, servings),
        )
        .await
        {
            Ok(Some(mut generated)) => {
                if generated.name.is_empty() {
                    food_name.clone_into(&mut generated.name);
                }
                info!(
                    food_name,
                    ingredients = generated.ingredients.len(),
                    steps = generated.steps.len(),
                    "Generated recipe"
                );
                generated.into_record(placeholder.image_ref)
            }
            Ok(None) => {
                debug!(food_name, "Generator returned no recipe");
                placeholder
            }
            Err(e) => {
                warn!(
                    food_name,
                    error.kind = e.kind(),
                    error = %e,
                    "Recipe generation failed"
                );
                placeholder
            }
        }
    }

    /// Estimated meal nutrition, only when the estimate carries energy
    pub async fn estimate_nutrition(&self, food_name: &str, servings: u32) -> Option<MealNutrition> {
        if food_name.is_empty() {
            return None;
        }
        let generator = self.generator.as_ref()?;

        match with_deadline(
            service::CONTENT_GENERATOR,
            self.deadline,
            generator.generate_nutrition(food_name, servings),
        )
        .await
        {
            Ok(Some(estimate)) => {
                let nutrition = estimate_to_meal(food_name, servings, estimate);
                if nutrition.has_energy() {
                    info!(
                        food_name,
                        energy_kcal = nutrition.energy_kcal(),
                        "Using generated nutrition"
                    );
                    Some(nutrition)
                } else {
                    debug!(food_name, "Generated nutrition has no energy, ignoring");
                    None
                }
            }
            Ok(None) => None,
            Err(e) => {
                warn!(
                    food_name,
                    error.kind = e.kind(),
                    error = %e,
                    "Nutrition estimation failed"
                );
                None
            }
        }
    }
}

/// Estimates are taken as reported: totals already cover every serving and the
/// serving weight is the model's own figure
fn estimate_to_meal(food_name: &str, servings: u32, estimate: GeneratedNutrition) -> MealNutrition {
    let size = estimate
        .serving_size_g
        .filter(|size| size.is_finite() && *size > 0.0)
        .unwrap_or(DEFAULT_SERVING_SIZE_G);
    MealNutrition {
        food_name: food_name.to_owned(),
        servings,
        serving_size_g: round_to_tenth(size),
        nutrients: estimate.totals.sanitized().map(round_to_tenth),
        source: NutritionSource::Generated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hansik_core::models::NutrientSet;

    #[test]
    fn test_estimate_is_not_rescaled() {
        let estimate = GeneratedNutrition {
            serving_size_g: Some(250.0),
            totals: NutrientSet {
                energy_kcal: 812.34,
                sodium_mg: -3.0,
                ..NutrientSet::default()
            },
        };
        let meal = estimate_to_meal("감자탕", 2, estimate);
        assert!((meal.energy_kcal() - 812.3).abs() < 1e-9);
        assert!(meal.nutrients.sodium_mg.abs() < f64::EPSILON);
        assert!((meal.serving_size_g - 250.0).abs() < 1e-9);
        assert_eq!(meal.servings, 2);
        assert_eq!(meal.source, NutritionSource::Generated);
    }

    #[test]
    fn test_missing_serving_size_uses_default_weight() {
        let estimate = GeneratedNutrition {
            serving_size_g: None,
            totals: NutrientSet {
                energy_kcal: 640.0,
                ..NutrientSet::default()
            },
        };
        let meal = estimate_to_meal("감자탕", 3, estimate);
        assert!((meal.serving_size_g - DEFAULT_SERVING_SIZE_G).abs() < 1e-9);
        assert!((meal.energy_kcal() - 640.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_without_generator_placeholder_is_kept() {
        let fallback = GenerativeFallback::new(None, Duration::from_secs(1));
        let placeholder = RecipeRecord::placeholder("감자탕", Some("img.jpg".to_owned()));
        let record = fallback
            .complete_recipe(placeholder.clone(), "감자탕", 1)
            .await;
        assert_eq!(record, placeholder);
        assert!(fallback.estimate_nutrition("감자탕", 1).await.is_none());
    }
}
