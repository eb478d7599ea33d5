// ABOUTME: Integration tests for environment-driven configuration and pipeline bootstrap
// ABOUTME: Runs serially because every test mutates process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use common::init_test_logging;
use hansik_core::models::{MatchTier, NutritionSource};
use hansik_fit::config::{ConfigError, ServerConfig};
use hansik_fit::Pipeline;
use serial_test::serial;
use tempfile::NamedTempFile;

const VARS: [&str; 13] = [
    "HANSIK_RECIPES_PATH",
    "HANSIK_VECTOR_INDEX_PATH",
    "HANSIK_NUTRITION_DB_URL",
    "HANSIK_SIMILARITY_FLOOR",
    "HANSIK_VECTOR_TOP_K",
    "HANSIK_SIMILAR_NUTRITION_LIMIT",
    "HANSIK_COLLABORATOR_TIMEOUT_SECS",
    "HANSIK_ENABLE_NARRATION",
    "LLM_BASE_URL",
    "LLM_MODEL",
    "LLM_API_KEY",
    "OPENAI_API_KEY",
    "EMBEDDING_MODEL",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_variables() {
    clear_env();
    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.data.recipes_path, None);
    assert_eq!(config.resolution.vector_top_k, 5);
    assert_eq!(config.resolution.similar_nutrition_limit, 3);
    assert_eq!(
        config.collaborator_timeout.as_duration(),
        Duration::from_secs(20)
    );
    assert!(!config.llm.is_configured());
    assert!(!config.llm.enable_narration);
}

#[test]
#[serial]
fn test_variables_override_defaults() {
    clear_env();
    env::set_var("HANSIK_RECIPES_PATH", "data/recipes.json");
    env::set_var("HANSIK_SIMILARITY_FLOOR", "0.65");
    env::set_var("HANSIK_VECTOR_TOP_K", "8");
    env::set_var("HANSIK_COLLABORATOR_TIMEOUT_SECS", "3");
    env::set_var("OPENAI_API_KEY", "sk-test");
    env::set_var("HANSIK_ENABLE_NARRATION", "true");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(
        config.data.recipes_path,
        Some(PathBuf::from("data/recipes.json"))
    );
    assert!((config.resolution.similarity_floor - 0.65).abs() < f64::EPSILON);
    assert_eq!(config.resolution.vector_top_k, 8);
    assert_eq!(config.collaborator_timeout.as_duration(), Duration::from_secs(3));
    assert!(config.llm.is_configured());
    assert!(config.llm.enable_narration);
}

#[test]
#[serial]
fn test_unparseable_value_is_rejected() {
    clear_env();
    env::set_var("HANSIK_VECTOR_TOP_K", "five");
    let result = ServerConfig::from_env();
    clear_env();

    assert!(matches!(
        result,
        Err(ConfigError::InvalidValue {
            key: "HANSIK_VECTOR_TOP_K",
            ..
        })
    ));
}

#[test]
#[serial]
fn test_out_of_range_floor_is_rejected() {
    clear_env();
    env::set_var("HANSIK_SIMILARITY_FLOOR", "1.2");
    let result = ServerConfig::from_env();
    clear_env();

    assert!(matches!(result, Err(ConfigError::OutOfRange { .. })));
}

#[tokio::test]
#[serial]
async fn test_pipeline_from_config_without_model() {
    init_test_logging();
    clear_env();
    let mut catalog = NamedTempFile::new().unwrap();
    catalog
        .write_all(r#"[{"recipe_id": "R-1", "name": "갈비탕"}]"#.as_bytes())
        .unwrap();
    env::set_var("HANSIK_RECIPES_PATH", catalog.path());
    env::set_var("HANSIK_NUTRITION_DB_URL", "sqlite::memory:");

    let config = ServerConfig::from_env().unwrap();
    clear_env();
    let pipeline = Pipeline::from_config(&config).await.unwrap();

    let state = pipeline.resolve_and_compute("갈비탕 2인분", None).await;
    assert_eq!(state.match_tier, Some(MatchTier::Exact));
    // Freshly migrated table holds no rows
    assert_eq!(state.nutrition.source, NutritionSource::Unknown);
    assert!(state.response.contains("갈비탕"));
}

#[tokio::test]
#[serial]
async fn test_pipeline_from_config_missing_catalog_fails() {
    clear_env();
    env::set_var("HANSIK_RECIPES_PATH", "/nonexistent/recipes.json");
    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert!(Pipeline::from_config(&config).await.is_err());
}
