// ABOUTME: Food query pipeline stages and the orchestrator that sequences them
// ABOUTME: Analysis, recipe and nutrition resolution, generative fallback, exercise, and response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Generative fallback for unresolved dishes
pub mod generative_fallback;
/// Nutrition resolution and scaling
pub mod nutrition_resolver;
/// Stage sequencing and dependency wiring
pub mod orchestrator;
/// Query interpretation
pub mod query_analyzer;
/// Tiered recipe matching
pub mod recipe_resolver;
/// Narration and template answers
pub mod response_formatter;
/// Per-request state
pub mod state;

pub use generative_fallback::GenerativeFallback;
pub use nutrition_resolver::NutritionResolver;
pub use orchestrator::{Pipeline, PipelineDeps, EMPTY_QUERY_ERROR, QUERY_TOO_LONG_ERROR};
pub use query_analyzer::{parse_with_rules, QueryAnalyzer};
pub use recipe_resolver::{passes_containment_gate, RecipeResolution, RecipeResolver};
pub use response_formatter::{build_narration_context, render_template, ResponseFormatter};
pub use state::PipelineState;
