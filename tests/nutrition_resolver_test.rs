// ABOUTME: Integration tests for nutrition resolution and serving scaling
// ABOUTME: Validates source precedence, energy acceptance, and store failure handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{init_test_logging, nutrition_row, MemoryNutritionStore};
use hansik_core::models::{MealNutrition, NutrientSet, NutritionSource, RecipeRecord};
use hansik_fit::collaborators::NutritionStore;
use hansik_fit::pipeline::NutritionResolver;

fn resolver(store: MemoryNutritionStore) -> NutritionResolver {
    init_test_logging();
    let store: Arc<dyn NutritionStore> = Arc::new(store);
    NutritionResolver::new(Some(store), 3, Duration::from_secs(2))
}

fn recipe(name: &str) -> RecipeRecord {
    RecipeRecord {
        id: format!("id-{name}"),
        name: name.to_owned(),
        ..RecipeRecord::default()
    }
}

#[tokio::test]
async fn test_exact_row_scaled_by_servings() {
    let store = MemoryNutritionStore::with_rows(vec![nutrition_row("잡채", 200.0, None)]);
    let meal = resolver(store).resolve(&recipe("잡채"), "잡채", 3).await;

    assert_eq!(meal.source, NutritionSource::StoreExact);
    assert!((meal.energy_kcal() - 600.0).abs() < 1e-9);
    assert!((meal.nutrients.protein_g - 30.0).abs() < 1e-9);
    // 100 g default serving
    assert!((meal.serving_size_g - 300.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_single_serving_is_identity() {
    let store = MemoryNutritionStore::with_rows(vec![nutrition_row("잡채", 200.0, Some(150.0))]);
    let meal = resolver(store).resolve(&recipe("잡채"), "잡채", 1).await;

    assert!((meal.energy_kcal() - 200.0).abs() < 1e-9);
    assert!((meal.serving_size_g - 150.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_similar_row_used_without_exact() {
    let store = MemoryNutritionStore::with_rows(vec![
        nutrition_row("해물잡채", 180.0, None),
        nutrition_row("잡채밥", 450.0, None),
    ]);
    let meal = resolver(store).resolve(&recipe("잡채"), "잡채", 2).await;

    assert_eq!(meal.source, NutritionSource::StoreSimilar);
    assert_eq!(meal.food_name, "잡채");
    assert!((meal.energy_kcal() - 360.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_zero_energy_row_is_rejected() {
    let store = MemoryNutritionStore::with_rows(vec![nutrition_row("물김치", 0.0, None)]);
    let meal = resolver(store).resolve(&recipe("물김치"), "물김치", 2).await;

    assert_eq!(meal, MealNutrition::unknown("물김치", 2));
}

#[tokio::test]
async fn test_embedded_nutrition_wins_over_store() {
    let store = MemoryNutritionStore::with_rows(vec![nutrition_row("잡채", 999.0, None)]);
    let with_embedded = RecipeRecord {
        embedded_nutrition: Some(NutrientSet {
            energy_kcal: 150.0,
            ..NutrientSet::default()
        }),
        ..recipe("잡채")
    };
    let meal = resolver(store).resolve(&with_embedded, "잡채", 2).await;

    assert_eq!(meal.source, NutritionSource::Recipe);
    assert!((meal.energy_kcal() - 300.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_analyzed_name_used_for_placeholder() {
    let store = MemoryNutritionStore::with_rows(vec![nutrition_row("떡볶이", 300.0, None)]);
    let meal = resolver(store)
        .resolve(&RecipeRecord::default(), "떡볶이", 1)
        .await;

    assert_eq!(meal.food_name, "떡볶이");
    assert_eq!(meal.source, NutritionSource::StoreExact);
}

#[tokio::test]
async fn test_empty_name_is_unknown() {
    let store = MemoryNutritionStore::with_rows(vec![nutrition_row("떡볶이", 300.0, None)]);
    let meal = resolver(store).resolve(&RecipeRecord::default(), "", 2).await;

    assert_eq!(meal, MealNutrition::unknown("", 2));
}

#[tokio::test]
async fn test_store_failure_is_absence() {
    let store = MemoryNutritionStore {
        fail: true,
        ..MemoryNutritionStore::default()
    };
    let meal = resolver(store).resolve(&recipe("잡채"), "잡채", 1).await;

    assert_eq!(meal.source, NutritionSource::Unknown);
    assert!(meal.nutrients.is_all_zero());
}

#[tokio::test]
async fn test_empty_embedded_object_falls_through_to_store() {
    let record: RecipeRecord =
        serde_json::from_str(r#"{"id": "r1", "name": "잡채", "nutrition": {}}"#).unwrap();
    assert!(record.embedded_nutrition.is_some());

    let store = MemoryNutritionStore::with_rows(vec![nutrition_row("잡채", 200.0, None)]);
    let meal = resolver(store).resolve(&record, "잡채", 1).await;

    assert_eq!(meal.source, NutritionSource::StoreExact);
    assert!((meal.energy_kcal() - 200.0).abs() < 1e-9);
}
