// ABOUTME: Concrete read-only backing stores for recipes, nutrition rows, and embeddings
// ABOUTME: JSON recipe catalog, SQLite nutrition table, and a flat L2 vector index
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// `SQLite` nutrition table
pub mod nutrition_db;
/// JSON recipe catalog file
pub mod recipe_catalog;
/// Flat L2 embedding index
pub mod vector_index;

pub use nutrition_db::SqliteNutritionStore;
pub use recipe_catalog::JsonRecipeCatalog;
pub use vector_index::{FlatVectorIndex, IndexEntry};
