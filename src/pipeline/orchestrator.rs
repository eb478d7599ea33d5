// ABOUTME: Pipeline orchestrator running every stage in fixed order over one request state
// ABOUTME: Wires collaborators by dependency injection and never aborts a request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Pipeline Orchestrator
//!
//! Stage order:
//!
//! 1. Query analysis
//! 2. Recipe resolution
//! 3. Generative fallback, recipe half (only for unresolved dishes)
//! 4. Nutrition resolution, then the nutrition half of the fallback when
//!    nothing carried energy
//! 5. Exercise recommendation and daily energy
//! 6. Response assembly
//!
//! A [`Pipeline`] is immutable after construction and can be shared through
//! an `Arc` by any number of concurrent requests.

use std::mem;
use std::sync::Arc;
use std::time::Duration;

use hansik_core::constants::query;
use hansik_core::models::{AnalyzedQuery, BodyProfile, RecipeOrigin, RecipeRecord};
use hansik_intelligence::{EnergyModel, ExerciseRecommender};
use tracing::{debug, info, info_span, warn, Instrument};

use super::generative_fallback::GenerativeFallback;
use super::nutrition_resolver::NutritionResolver;
use super::query_analyzer::QueryAnalyzer;
use super::recipe_resolver::{RecipeResolution, RecipeResolver};
use super::response_formatter::ResponseFormatter;
use super::state::PipelineState;
use crate::collaborators::{
    ContentGenerator, EmbeddingIndex, ModelCollaborator, NutritionStore, QueryUnderstanding,
    RecipeStore, ResponseNarrator,
};
use crate::config::{ResolutionConfig, ServerConfig, DEFAULT_COLLABORATOR_TIMEOUT_SECS};
use crate::errors::AppResult;
use crate::llm::{EmbeddingProvider, LlmProvider, OpenAiCompatibleProvider};
use crate::stores::{FlatVectorIndex, JsonRecipeCatalog, SqliteNutritionStore};

/// Error recorded for blank queries
pub const EMPTY_QUERY_ERROR: &str = "query empty";

/// Error recorded for queries longer than [`query::MAX_CHARS`] characters
pub const QUERY_TOO_LONG_ERROR: &str = "query too long";

fn reject_query(raw_query: &str) -> Option<&'static str> {
    if raw_query.trim().is_empty() {
        Some(EMPTY_QUERY_ERROR)
    } else if raw_query.chars().count() > query::MAX_CHARS {
        Some(QUERY_TOO_LONG_ERROR)
    } else {
        None
    }
}

/// Collaborators and tuning for a [`Pipeline`]; absent collaborators disable their stage
#[derive(Clone)]
pub struct PipelineDeps {
    /// Recipe catalog
    pub recipe_store: Option<Arc<dyn RecipeStore>>,
    /// Nutrition table
    pub nutrition_store: Option<Arc<dyn NutritionStore>>,
    /// Recipe name embedding index
    pub embedding_index: Option<Arc<dyn EmbeddingIndex>>,
    /// Model-based query interpretation
    pub understanding: Option<Arc<dyn QueryUnderstanding>>,
    /// Recipe and nutrition generation
    pub generator: Option<Arc<dyn ContentGenerator>>,
    /// Model-written final answers
    pub narrator: Option<Arc<dyn ResponseNarrator>>,
    /// Resolver tuning
    pub resolution: ResolutionConfig,
    /// Deadline for each collaborator call
    pub collaborator_timeout: Duration,
    /// Energy formulas
    pub energy: EnergyModel,
}

impl Default for PipelineDeps {
    fn default() -> Self {
        Self {
            recipe_store: None,
            nutrition_store: None,
            embedding_index: None,
            understanding: None,
            generator: None,
            narrator: None,
            resolution: ResolutionConfig::default(),
            collaborator_timeout: Duration::from_secs(DEFAULT_COLLABORATOR_TIMEOUT_SECS),
            energy: EnergyModel::default(),
        }
    }
}

/// The food query pipeline
#[derive(Clone)]
pub struct Pipeline {
    analyzer: QueryAnalyzer,
    recipes: RecipeResolver,
    fallback: GenerativeFallback,
    nutrition: NutritionResolver,
    recommender: ExerciseRecommender,
    formatter: ResponseFormatter,
}

impl Pipeline {
    /// Assemble the stages over injected collaborators
    #[must_use]
    pub fn new(deps: PipelineDeps) -> Self {
        let deadline = deps.collaborator_timeout;
        Self {
            analyzer: QueryAnalyzer::new(deps.understanding, deadline),
            recipes: RecipeResolver::new(
                deps.recipe_store,
                deps.embedding_index,
                deps.resolution,
                deadline,
            ),
            fallback: GenerativeFallback::new(deps.generator, deadline),
            nutrition: NutritionResolver::new(
                deps.nutrition_store,
                deps.resolution.similar_nutrition_limit,
                deadline,
            ),
            recommender: ExerciseRecommender::new(deps.energy),
            formatter: ResponseFormatter::new(deps.narrator, deadline),
        }
    }

    /// Load data sources and model collaborators named by `config`
    ///
    /// # Errors
    ///
    /// Returns an error when a configured file or database cannot be opened,
    /// or the model client cannot be built
    pub async fn from_config(config: &ServerConfig) -> AppResult<Self> {
        let mut deps = PipelineDeps {
            resolution: config.resolution,
            collaborator_timeout: config.collaborator_timeout.as_duration(),
            ..PipelineDeps::default()
        };

        if let Some(path) = &config.data.recipes_path {
            let catalog: Arc<dyn RecipeStore> = Arc::new(JsonRecipeCatalog::load(path).await?);
            deps.recipe_store = Some(catalog);
        }

        if let Some(url) = &config.data.nutrition_db_url {
            let store = SqliteNutritionStore::connect(url).await?;
            store.migrate().await?;
            let store: Arc<dyn NutritionStore> = Arc::new(store);
            deps.nutrition_store = Some(store);
        }

        if config.llm.is_configured() {
            let provider = Arc::new(OpenAiCompatibleProvider::from_settings(&config.llm)?);
            let llm: Arc<dyn LlmProvider> = provider.clone();
            let collaborator = Arc::new(ModelCollaborator::new(llm));
            deps.understanding = Some(collaborator.clone());
            deps.generator = Some(collaborator.clone());
            if config.llm.enable_narration {
                deps.narrator = Some(collaborator);
            }

            if let Some(path) = &config.data.vector_index_path {
                let embedder: Arc<dyn EmbeddingProvider> = provider;
                let index: Arc<dyn EmbeddingIndex> =
                    Arc::new(FlatVectorIndex::load(path, embedder).await?);
                deps.embedding_index = Some(index);
            }
        } else {
            info!("No language model key configured, using keyword rules and template answers");
            if config.data.vector_index_path.is_some() {
                warn!("Vector index configured without an embedding endpoint, skipping it");
            }
        }

        Ok(Self::new(deps))
    }

    /// Answer one query.
    ///
    /// Never fails: collaborator problems degrade to rules, templates, and
    /// zero values. Blank or overlong queries skip analysis and set
    /// [`PipelineState::error`].
    pub async fn resolve_and_compute(
        &self,
        raw_query: &str,
        profile: Option<BodyProfile>,
    ) -> PipelineState {
        let state = PipelineState::new(raw_query, profile.unwrap_or_default());
        let span = info_span!("pipeline", request_id = %state.request_id);
        self.run(state).instrument(span).await
    }

    async fn run(&self, mut state: PipelineState) -> PipelineState {
        info!(query = %state.raw_query, "Pipeline started");

        // Query analysis
        if let Some(rejection) = reject_query(&state.raw_query) {
            warn!(reason = rejection, "Query rejected before analysis");
            state.error = Some(rejection.to_owned());
            state.analyzed_query = AnalyzedQuery {
                original_text: state.raw_query.clone(),
                ..AnalyzedQuery::default()
            };
        } else {
            let (analyzed, source) = self.analyzer.analyze(&state.raw_query).await;
            state.analyzed_query = analyzed;
            state.analysis_source = source;
        }
        let food_name = state.analyzed_query.food_name.clone();
        let servings = state.analyzed_query.servings;

        // Recipe resolution
        match self.recipes.resolve(&food_name).await {
            RecipeResolution::Resolved { recipe, tier } => {
                state.resolved_recipe = recipe;
                state.recipe_origin = RecipeOrigin::Resolved;
                state.match_tier = Some(tier);
            }
            RecipeResolution::NeedsGeneration { image_hint } => {
                state.resolved_recipe = RecipeRecord::placeholder(food_name.clone(), image_hint);
                state.recipe_origin = RecipeOrigin::Generated;
                state.match_tier = None;
            }
        }

        // Generative fallback, recipe half
        if state.recipe_origin == RecipeOrigin::Generated {
            let placeholder = mem::take(&mut state.resolved_recipe);
            state.resolved_recipe = self
                .fallback
                .complete_recipe(placeholder, &food_name, servings)
                .await;
        }

        // Nutrition resolution, then the nutrition half of the fallback
        state.nutrition = self
            .nutrition
            .resolve(&state.resolved_recipe, &food_name, servings)
            .await;
        if !state.nutrition.has_energy() {
            if let Some(estimate) = self.fallback.estimate_nutrition(&food_name, servings).await {
                state.nutrition = estimate;
            }
        }

        // Exercise recommendation
        let target = state.nutrition.energy_kcal();
        state.exercise_recommendations = self
            .recommender
            .recommend_one_per_tier(target, &state.body_profile)
            .into_values()
            .collect();
        state.daily_energy = Some(
            self.recommender
                .energy_model()
                .daily_energy(&state.body_profile),
        );
        debug!(
            target_kcal = target,
            recommendations = state.exercise_recommendations.len(),
            "Exercise stage complete"
        );

        // Response assembly
        state.response = self.formatter.format(&state).await;

        info!(
            food_name = %state.display_food_name(),
            origin = ?state.recipe_origin,
            tier = ?state.match_tier,
            nutrition_source = ?state.nutrition.source,
            energy_kcal = state.nutrition.energy_kcal(),
            "Pipeline finished"
        );
        state
    }
}
