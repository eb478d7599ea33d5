// ABOUTME: Recipe record model shared by the record store, resolver, and generator
// ABOUTME: Includes origin and match-tier tags describing how a recipe was obtained
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::nutrition::NutrientSet;

/// A recipe as stored in the catalog or synthesized by the generator.
///
/// An empty `id` marks a record that was never persisted (a placeholder or a
/// generated recipe). Such records must not be looked up by id again.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecipeRecord {
    /// Catalog identifier, empty when not persisted
    #[serde(default, alias = "recipe_id")]
    pub id: String,
    /// Dish name, empty when the source omitted it
    #[serde(default)]
    pub name: String,
    /// Dish category (soup/stew, side dish, rice, ...)
    #[serde(default)]
    pub category: String,
    /// Cooking method (boil, stir-fry, grill, ...)
    #[serde(default)]
    pub cooking_method: String,
    /// Ingredient lines in display order
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Cooking steps in order
    #[serde(default, alias = "instructions")]
    pub steps: Vec<String>,
    /// Cooking tip
    #[serde(default, alias = "tips")]
    pub tip: String,
    /// Image URL or path
    #[serde(default, alias = "image_url")]
    pub image_ref: String,
    /// Per-serving nutrition shipped with the record
    #[serde(default, alias = "nutrition", skip_serializing_if = "Option::is_none")]
    pub embedded_nutrition: Option<NutrientSet>,
}

impl RecipeRecord {
    /// Synthetic placeholder for a dish that still needs generation
    pub fn placeholder(name: impl Into<String>, image_ref: Option<String>) -> Self {
        Self {
            name: name.into(),
            image_ref: image_ref.unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Whether this record was loaded from the catalog
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }

    /// Whether the record has neither ingredients nor steps
    #[must_use]
    pub fn has_no_content(&self) -> bool {
        self.ingredients.is_empty() && self.steps.is_empty()
    }

    /// Character length of the name, as used by the containment gate
    #[must_use]
    pub fn name_len(&self) -> usize {
        self.name.chars().count()
    }
}

/// How the recipe in the pipeline state was obtained
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecipeOrigin {
    /// Matched a catalog record
    Resolved,
    /// Placeholder or generative fallback result
    #[default]
    Generated,
}

/// Which resolver tier produced a catalog match
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Case-sensitive name equality
    Exact,
    /// Shortest containing name that passed the near-identity gate
    Containment,
    /// Embedding similarity neighbor
    Vector,
}
