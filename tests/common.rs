// ABOUTME: Shared test utilities and stub collaborators for integration tests
// ABOUTME: Provides logging setup, an in-memory nutrition table, and a fixture recipe catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `hansik_fit`

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use hansik_core::models::{NutrientSet, QueryType, RecipeRecord};
use hansik_fit::collaborators::{
    ContentGenerator, EmbeddingIndex, GeneratedNutrition, GeneratedRecipe, NutritionRecord,
    NutritionStore, QueryInterpretation, QueryUnderstanding, RecipeStore, ResponseNarrator,
    SimilarityHit,
};
use hansik_fit::errors::{CollaboratorError, CollaboratorResult};
use hansik_fit::pipeline::{Pipeline, PipelineDeps};
use hansik_fit::stores::JsonRecipeCatalog;
use tokio::time::sleep;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Deadline used by stubs that must time out
pub const SHORT_DEADLINE: Duration = Duration::from_millis(50);

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

// ============================================================================
// Fixtures
// ============================================================================

fn record(id: &str, name: &str) -> RecipeRecord {
    RecipeRecord {
        id: id.to_owned(),
        name: name.to_owned(),
        category: "국/찌개".to_owned(),
        cooking_method: "끓이기".to_owned(),
        ..RecipeRecord::default()
    }
}

/// Catalog used across pipeline tests
pub fn fixture_records() -> Vec<RecipeRecord> {
    vec![
        RecipeRecord {
            ingredients: vec!["시금치 1줌".to_owned(), "된장 1큰술".to_owned()],
            steps: vec!["시금치를 데친다".to_owned()],
            ..record("R-1", "시금치된장국")
        },
        RecipeRecord {
            ingredients: vec!["된장 1큰술".to_owned(), "두부 1/2모".to_owned()],
            steps: vec!["물을 끓인다".to_owned(), "된장을 푼다".to_owned()],
            tip: "멸치 육수를 쓰면 좋다".to_owned(),
            embedded_nutrition: Some(NutrientSet {
                energy_kcal: 90.0,
                protein_g: 6.5,
                fat_g: 3.2,
                carbohydrate_g: 8.1,
                sodium_mg: 780.0,
                ..NutrientSet::default()
            }),
            ..record("R-2", "된장국")
        },
        RecipeRecord {
            image_ref: "images/spicy_kimchi_stew.jpg".to_owned(),
            ..record("R-3", "얼큰 김치찌개")
        },
        record("R-4", "소불고기"),
        RecipeRecord {
            category: "밥".to_owned(),
            cooking_method: "비비기".to_owned(),
            ingredients: vec!["밥 1공기".to_owned(), "고추장 1큰술".to_owned()],
            ..record("R-5", "비빔밥")
        },
    ]
}

pub fn fixture_catalog() -> Arc<JsonRecipeCatalog> {
    Arc::new(JsonRecipeCatalog::from_records(fixture_records()))
}

pub fn nutrition_row(food_name: &str, kcal: f64, serving_size_g: Option<f64>) -> NutritionRecord {
    NutritionRecord {
        food_name: food_name.to_owned(),
        serving_size_g,
        per_serving: NutrientSet {
            energy_kcal: kcal,
            protein_g: kcal / 20.0,
            ..NutrientSet::default()
        },
    }
}

/// Deps with the fixture catalog and short deadlines
pub fn fixture_deps() -> PipelineDeps {
    init_test_logging();
    let catalog: Arc<dyn RecipeStore> = fixture_catalog();
    PipelineDeps {
        recipe_store: Some(catalog),
        collaborator_timeout: Duration::from_secs(2),
        ..PipelineDeps::default()
    }
}

pub fn fixture_pipeline() -> Pipeline {
    Pipeline::new(fixture_deps())
}

// ============================================================================
// Stub collaborators
// ============================================================================

/// Understanding collaborator with a canned answer and optional delay
pub struct StubUnderstanding {
    pub answer: CollaboratorResult<QueryInterpretation>,
    pub delay: Option<Duration>,
}

impl StubUnderstanding {
    pub fn answering(food_name: &str, servings: u32, query_type: QueryType) -> Self {
        Self {
            answer: Ok(QueryInterpretation {
                food_name: food_name.to_owned(),
                servings: Some(servings),
                query_type: Some(query_type),
            }),
            delay: None,
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: Err(CollaboratorError::Unavailable {
                service: "query_understanding",
            }),
            delay: None,
        }
    }

    pub fn slow() -> Self {
        Self {
            delay: Some(Duration::from_secs(5)),
            ..Self::answering("지연된음식", 9, QueryType::General)
        }
    }
}

#[async_trait]
impl QueryUnderstanding for StubUnderstanding {
    async fn analyze(&self, _text: &str) -> CollaboratorResult<QueryInterpretation> {
        if let Some(delay) = self.delay {
            sleep(delay).await;
        }
        self.answer.clone()
    }
}

/// Generator returning fixed content and counting calls
#[derive(Default)]
pub struct StubGenerator {
    pub recipe: Option<GeneratedRecipe>,
    pub nutrition: Option<GeneratedNutrition>,
    pub fail: bool,
    pub recipe_calls: AtomicUsize,
    pub nutrition_calls: AtomicUsize,
    pub nutrition_requests: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn with_content(kcal: f64) -> Self {
        Self {
            recipe: Some(GeneratedRecipe {
                name: String::new(),
                category: "찌개".to_owned(),
                cooking_method: "끓이기".to_owned(),
                ingredients: vec!["김치 1컵".to_owned(), "돼지고기 100g".to_owned()],
                steps: vec!["김치를 볶는다".to_owned(), "물을 붓고 끓인다".to_owned()],
                tip: "묵은지를 쓰면 깊은 맛이 난다".to_owned(),
            }),
            nutrition: Some(GeneratedNutrition {
                serving_size_g: Some(300.0),
                totals: NutrientSet {
                    energy_kcal: kcal,
                    protein_g: 18.0,
                    fat_g: 12.0,
                    carbohydrate_g: 15.0,
                    ..NutrientSet::default()
                },
            }),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn recipe_calls(&self) -> usize {
        self.recipe_calls.load(Ordering::SeqCst)
    }

    pub fn nutrition_calls(&self) -> usize {
        self.nutrition_calls.load(Ordering::SeqCst)
    }

    /// Food names passed to `generate_nutrition`, in call order
    pub fn nutrition_requests(&self) -> Vec<String> {
        self.nutrition_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentGenerator for StubGenerator {
    async fn generate_recipe(
        &self,
        _food_name: &str,
        _servings: u32,
    ) -> CollaboratorResult<Option<GeneratedRecipe>> {
        self.recipe_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CollaboratorError::failed("content_generator", "boom"));
        }
        Ok(self.recipe.clone())
    }

    async fn generate_nutrition(
        &self,
        food_name: &str,
        _servings: u32,
    ) -> CollaboratorResult<Option<GeneratedNutrition>> {
        self.nutrition_calls.fetch_add(1, Ordering::SeqCst);
        self.nutrition_requests
            .lock()
            .unwrap()
            .push(food_name.to_owned());
        if self.fail {
            return Err(CollaboratorError::failed("content_generator", "boom"));
        }
        Ok(self.nutrition)
    }
}

/// Embedding index returning fixed hits, or an error
pub struct StubIndex {
    pub hits: CollaboratorResult<Vec<SimilarityHit>>,
}

impl StubIndex {
    pub fn with_hits(hits: &[(&str, &str, f64)]) -> Self {
        Self {
            hits: Ok(hits
                .iter()
                .map(|(id, name, similarity)| SimilarityHit {
                    record_id: (*id).to_owned(),
                    name: (*name).to_owned(),
                    similarity: *similarity,
                })
                .collect()),
        }
    }

    pub fn failing() -> Self {
        Self {
            hits: Err(CollaboratorError::failed("embedding_index", "index offline")),
        }
    }
}

#[async_trait]
impl EmbeddingIndex for StubIndex {
    async fn search(
        &self,
        _text: &str,
        top_k: usize,
        floor: f64,
    ) -> CollaboratorResult<Vec<SimilarityHit>> {
        self.hits.clone().map(|hits| {
            hits.into_iter()
                .filter(|hit| hit.similarity >= floor)
                .take(top_k)
                .collect()
        })
    }
}

/// Recipe store whose every call fails
pub struct FailingRecipeStore;

#[async_trait]
impl RecipeStore for FailingRecipeStore {
    async fn find_by_id_or_name(&self, _key: &str) -> CollaboratorResult<Option<RecipeRecord>> {
        Err(CollaboratorError::failed("recipe_store", "disk error"))
    }

    async fn all_records(&self) -> CollaboratorResult<Arc<Vec<RecipeRecord>>> {
        Err(CollaboratorError::failed("recipe_store", "disk error"))
    }
}

/// In-memory nutrition table with substring similarity
#[derive(Default)]
pub struct MemoryNutritionStore {
    pub rows: Vec<NutritionRecord>,
    pub fail: bool,
}

impl MemoryNutritionStore {
    pub fn with_rows(rows: Vec<NutritionRecord>) -> Self {
        Self { rows, fail: false }
    }
}

#[async_trait]
impl NutritionStore for MemoryNutritionStore {
    async fn find_exact(&self, food_name: &str) -> CollaboratorResult<Option<NutritionRecord>> {
        if self.fail {
            return Err(CollaboratorError::failed("nutrition_store", "locked"));
        }
        Ok(self.rows.iter().find(|row| row.food_name == food_name).cloned())
    }

    async fn find_similar(
        &self,
        food_name: &str,
        limit: usize,
    ) -> CollaboratorResult<Vec<NutritionRecord>> {
        if self.fail {
            return Err(CollaboratorError::failed("nutrition_store", "locked"));
        }
        Ok(self
            .rows
            .iter()
            .filter(|row| row.food_name.contains(food_name))
            .take(limit)
            .cloned()
            .collect())
    }
}

/// Narrator echoing a fixed answer
pub struct StubNarrator {
    pub answer: CollaboratorResult<String>,
}

#[async_trait]
impl ResponseNarrator for StubNarrator {
    async fn narrate(&self, _context: &str) -> CollaboratorResult<String> {
        self.answer.clone()
    }
}
