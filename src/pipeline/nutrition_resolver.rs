// ABOUTME: Nutrition resolution from recipe-embedded values or the nutrition store
// ABOUTME: Scales per-serving values to meal totals and falls back to an all-zero result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Duration;

use hansik_core::models::{MealNutrition, NutritionSource, RecipeRecord};
use tracing::{debug, info, warn};

use crate::collaborators::{service, with_deadline, NutritionRecord, NutritionStore};

/// Nutrition resolution stage
#[derive(Clone)]
pub struct NutritionResolver {
    store: Option<Arc<dyn NutritionStore>>,
    similar_limit: usize,
    deadline: Duration,
}

impl NutritionResolver {
    /// Resolver over an optional nutrition store
    #[must_use]
    pub fn new(
        store: Option<Arc<dyn NutritionStore>>,
        similar_limit: usize,
        deadline: Duration,
    ) -> Self {
        Self {
            store,
            similar_limit,
            deadline,
        }
    }

    /// Meal-total nutrition for `servings` of the recipe.
    ///
    /// The recipe name wins over `food_name` when both are present. Sources
    /// are tried in order: values embedded in the recipe, an exact store row,
    /// then the best similar store row. An all-zero embedded set counts as
    /// absent. Store rows count only when the scaled energy is positive.
    pub async fn resolve(
        &self,
        recipe: &RecipeRecord,
        food_name: &str,
        servings: u32,
    ) -> MealNutrition {
        let name = if recipe.name.is_empty() {
            food_name
        } else {
            recipe.name.as_str()
        };
        if name.is_empty() {
            return MealNutrition::unknown(name, servings);
        }

        if let Some(per_serving) = recipe.embedded_nutrition.filter(|n| !n.is_all_zero()) {
            debug!(food_name = name, servings, "Using recipe nutrition");
            return MealNutrition::from_per_serving(
                name,
                servings,
                None,
                per_serving,
                NutritionSource::Recipe,
            );
        }

        if let Some(nutrition) = self.from_store(name, servings).await {
            return nutrition;
        }

        debug!(food_name = name, "No nutrition found");
        MealNutrition::unknown(name, servings)
    }

    async fn from_store(&self, name: &str, servings: u32) -> Option<MealNutrition> {
        let store = self.store.as_ref()?;

        let exact = match with_deadline(
            service::NUTRITION_STORE,
            self.deadline,
            store.find_exact(name),
        )
        .await
        {
            Ok(found) => found,
            Err(e) => {
                warn!(error.kind = e.kind(), error = %e, "Exact nutrition lookup failed");
                None
            }
        };
        let (record, source) = if let Some(record) = exact {
            (record, NutritionSource::StoreExact)
        } else {
            let similar = match with_deadline(
                service::NUTRITION_STORE,
                self.deadline,
                store.find_similar(name, self.similar_limit),
            )
            .await
            {
                Ok(rows) => rows,
                Err(e) => {
                    warn!(error.kind = e.kind(), error = %e, "Similar nutrition lookup failed");
                    Vec::new()
                }
            };
            (similar.into_iter().next()?, NutritionSource::StoreSimilar)
        };

        let nutrition = scale_record(name, servings, record, source);
        if nutrition.has_energy() {
            info!(
                food_name = name,
                source = ?source,
                energy_kcal = nutrition.energy_kcal(),
                "Resolved nutrition from store"
            );
            Some(nutrition)
        } else {
            debug!(food_name = name, "Store row has no energy, ignoring");
            None
        }
    }
}

fn scale_record(
    name: &str,
    servings: u32,
    record: NutritionRecord,
    source: NutritionSource,
) -> MealNutrition {
    MealNutrition::from_per_serving(
        name,
        servings,
        record.serving_size_g,
        record.per_serving,
        source,
    )
}
