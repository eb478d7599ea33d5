// ABOUTME: SQLite-backed per-serving nutrition table accessed through sqlx
// ABOUTME: Exact food-name lookup plus LIKE search ordered exact, prefix, then other matches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use hansik_core::models::NutrientSet;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::collaborators::{service, NutritionRecord, NutritionStore};
use crate::errors::{AppResult, CollaboratorError, CollaboratorResult};

const NUTRITION_COLUMNS: &str = "food_name, serving_size, calories, protein, fat, carbohydrate, \
     sugar, fiber, sodium, calcium, iron, potassium, vitamin_a, vitamin_c, cholesterol";

/// Read-only nutrition store over a `nutrition` table
#[derive(Debug, Clone)]
pub struct SqliteNutritionStore {
    pool: SqlitePool,
}

impl SqliteNutritionStore {
    /// Connect to a database URL such as `sqlite:data/nutrition.db` or `sqlite::memory:`
    ///
    /// In-memory databases are pinned to a single long-lived connection so
    /// every query sees the same data.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the connection fails
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let is_memory = database_url.contains(":memory:");
        let pool_options = if is_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(Option::<Duration>::None)
                .max_lifetime(Option::<Duration>::None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options.connect_with(options).await?;
        info!(database_url, "Connected to nutrition database");
        Ok(Self { pool })
    }

    /// Create the `nutrition` table when it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS nutrition (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                food_name TEXT NOT NULL,
                category1 TEXT,
                category2 TEXT,
                serving_size REAL,
                calories REAL DEFAULT 0,
                protein REAL DEFAULT 0,
                fat REAL DEFAULT 0,
                carbohydrate REAL DEFAULT 0,
                sugar REAL DEFAULT 0,
                fiber REAL DEFAULT 0,
                sodium REAL DEFAULT 0,
                calcium REAL DEFAULT 0,
                iron REAL DEFAULT 0,
                potassium REAL DEFAULT 0,
                vitamin_a REAL DEFAULT 0,
                vitamin_c REAL DEFAULT 0,
                cholesterol REAL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_nutrition_food_name ON nutrition(food_name)")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Insert one per-serving row
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert(&self, record: &NutritionRecord) -> AppResult<()> {
        let n = &record.per_serving;
        sqlx::query(&format!(
            "INSERT INTO nutrition ({NUTRITION_COLUMNS}) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(&record.food_name)
        .bind(record.serving_size_g)
        .bind(n.energy_kcal)
        .bind(n.protein_g)
        .bind(n.fat_g)
        .bind(n.carbohydrate_g)
        .bind(n.sugar_g)
        .bind(n.fiber_g)
        .bind(n.sodium_mg)
        .bind(n.calcium_mg)
        .bind(n.iron_mg)
        .bind(n.potassium_mg)
        .bind(n.vitamin_a_ug)
        .bind(n.vitamin_c_mg)
        .bind(n.cholesterol_mg)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Total row count
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count(&self) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM nutrition")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("total")?)
    }

    fn row_to_record(row: &SqliteRow) -> NutritionRecord {
        let amount = |column: &str| -> f64 {
            row.try_get::<Option<f64>, _>(column)
                .ok()
                .flatten()
                .unwrap_or(0.0)
        };
        NutritionRecord {
            food_name: row.try_get("food_name").unwrap_or_default(),
            serving_size_g: row
                .try_get::<Option<f64>, _>("serving_size")
                .ok()
                .flatten()
                .filter(|size| *size > 0.0),
            per_serving: NutrientSet {
                energy_kcal: amount("calories"),
                protein_g: amount("protein"),
                fat_g: amount("fat"),
                carbohydrate_g: amount("carbohydrate"),
                sugar_g: amount("sugar"),
                fiber_g: amount("fiber"),
                sodium_mg: amount("sodium"),
                calcium_mg: amount("calcium"),
                iron_mg: amount("iron"),
                potassium_mg: amount("potassium"),
                vitamin_a_ug: amount("vitamin_a"),
                vitamin_c_mg: amount("vitamin_c"),
                cholesterol_mg: amount("cholesterol"),
            }
            .sanitized(),
        }
    }
}

fn store_error(error: &sqlx::Error) -> CollaboratorError {
    CollaboratorError::failed(service::NUTRITION_STORE, error)
}

#[async_trait]
impl NutritionStore for SqliteNutritionStore {
    async fn find_exact(&self, food_name: &str) -> CollaboratorResult<Option<NutritionRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {NUTRITION_COLUMNS} FROM nutrition WHERE food_name = ? LIMIT 1"
        ))
        .bind(food_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error(&e))?;
        Ok(row.as_ref().map(Self::row_to_record))
    }

    async fn find_similar(
        &self,
        food_name: &str,
        limit: usize,
    ) -> CollaboratorResult<Vec<NutritionRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {NUTRITION_COLUMNS} FROM nutrition \
             WHERE food_name LIKE ? \
             ORDER BY CASE WHEN food_name = ? THEN 0 WHEN food_name LIKE ? THEN 1 ELSE 2 END, \
             food_name \
             LIMIT ?"
        ))
        .bind(format!("%{food_name}%"))
        .bind(food_name)
        .bind(format!("{food_name}%"))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error(&e))?;
        debug!(food_name, matches = rows.len(), "Nutrition similarity search");
        Ok(rows.iter().map(Self::row_to_record).collect())
    }
}
