// ABOUTME: Integration tests for loading the recipe catalog and vector index from disk
// ABOUTME: Uses temporary files for both JSON layouts and for index validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use common::init_test_logging;
use hansik_fit::collaborators::{EmbeddingIndex, RecipeStore};
use hansik_fit::errors::AppError;
use hansik_fit::llm::EmbeddingProvider;
use hansik_fit::stores::{FlatVectorIndex, JsonRecipeCatalog};
use tempfile::NamedTempFile;

struct FixedEmbedder(Vec<f32>);

#[async_trait]
impl EmbeddingProvider for FixedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, AppError> {
        Ok(self.0.clone())
    }
}

fn temp_json(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_catalog_loads_wrapped_records() {
    init_test_logging();
    let file = temp_json(
        r#"{"recipes": [{
            "recipe_id": "R-10",
            "name": "잡채",
            "category": "반찬",
            "cooking_method": "볶기",
            "ingredients": ["당면 100g", "시금치 50g"],
            "instructions": ["당면을 삶는다", "채소와 볶는다"],
            "tip": "참기름은 마지막에",
            "image_url": "images/japchae.jpg",
            "nutrition": {"calories": 280.5, "protein": 4.2}
        }]}"#,
    );
    let catalog = JsonRecipeCatalog::load(file.path()).await.unwrap();
    assert_eq!(catalog.len(), 1);

    let record = catalog.find_by_id_or_name("R-10").await.unwrap().unwrap();
    assert_eq!(record.name, "잡채");
    assert_eq!(record.steps.len(), 2);
    assert_eq!(record.image_ref, "images/japchae.jpg");
    let nutrition = record.embedded_nutrition.unwrap();
    assert!((nutrition.energy_kcal - 280.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_catalog_load_survives_nameless_record() {
    init_test_logging();
    let file = temp_json(
        r#"[
            {"recipe_id": "R-20", "category": "반찬", "ingredients": ["콩나물 200g"]},
            {"recipe_id": "R-21", "name": "콩나물국", "nutrition": {"calories": 45}}
        ]"#,
    );
    let catalog = JsonRecipeCatalog::load(file.path()).await.unwrap();
    assert_eq!(catalog.len(), 1);
    assert!(catalog.find_by_id_or_name("R-20").await.unwrap().is_none());
    let record = catalog.find_by_id_or_name("콩나물국").await.unwrap().unwrap();
    assert_eq!(record.id, "R-21");
}

#[tokio::test]
async fn test_catalog_missing_file_is_error() {
    let result = JsonRecipeCatalog::load("/nonexistent/recipes.json").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_catalog_records_share_storage() {
    let catalog = JsonRecipeCatalog::from_json(r#"[{"name": "김밥"}, {"name": "라면"}]"#).unwrap();
    let first = catalog.all_records().await.unwrap();
    let second = catalog.all_records().await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn test_vector_index_loads_and_searches() {
    init_test_logging();
    let file = temp_json(
        r#"{"entries": [
            {"id": "R-1", "name": "된장국", "embedding": [0.0, 0.0, 1.0]},
            {"recipe_id": "R-2", "name": "미역국", "embedding": [0.0, 1.0, 0.0]}
        ]}"#,
    );
    let index = FlatVectorIndex::load(file.path(), Arc::new(FixedEmbedder(vec![0.0, 0.9, 0.1])))
        .await
        .unwrap();
    assert_eq!(index.len(), 2);

    let hits = index.search("미역국", 5, 0.5).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].record_id, "R-2");
    assert!(hits[0].similarity > 0.9);
}

#[tokio::test]
async fn test_vector_index_rejects_ragged_embeddings() {
    let file = temp_json(
        r#"{"entries": [
            {"id": "a", "name": "a", "embedding": [1.0, 2.0]},
            {"id": "b", "name": "b", "embedding": [1.0]}
        ]}"#,
    );
    let result = FlatVectorIndex::load(file.path(), Arc::new(FixedEmbedder(vec![1.0, 2.0]))).await;
    assert!(result.is_err());
}
