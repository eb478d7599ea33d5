// ABOUTME: Recipe catalog loaded once from a JSON file and shared read-only across requests
// ABOUTME: Accepts a bare record array or an object with a `recipes` array
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use hansik_core::models::RecipeRecord;
use serde::Deserialize;
use tokio::fs;
use tracing::{info, warn};

use crate::collaborators::RecipeStore;
use crate::errors::{AppResult, CollaboratorResult};

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Records(Vec<RecipeRecord>),
    Wrapped { recipes: Vec<RecipeRecord> },
}

/// In-memory recipe catalog
#[derive(Debug, Clone, Default)]
pub struct JsonRecipeCatalog {
    records: Arc<Vec<RecipeRecord>>,
}

impl JsonRecipeCatalog {
    /// Build a catalog from records already in memory
    #[must_use]
    pub fn from_records(records: Vec<RecipeRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// Parse catalog JSON, skipping records without a name
    ///
    /// # Errors
    ///
    /// Returns a serialization error when the text is not a catalog
    pub fn from_json(text: &str) -> AppResult<Self> {
        let mut records = match serde_json::from_str::<CatalogFile>(text)? {
            CatalogFile::Records(records) | CatalogFile::Wrapped { recipes: records } => records,
        };
        let total = records.len();
        records.retain(|record| !record.name.trim().is_empty());
        if records.len() < total {
            warn!(skipped = total - records.len(), "Skipped catalog records without a name");
        }
        Ok(Self::from_records(records))
    }

    /// Load and parse a catalog file
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed
    pub async fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).await?;
        let catalog = Self::from_json(&text)?;
        info!(path = %path.display(), records = catalog.len(), "Loaded recipe catalog");
        Ok(catalog)
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecipeStore for JsonRecipeCatalog {
    async fn find_by_id_or_name(&self, key: &str) -> CollaboratorResult<Option<RecipeRecord>> {
        if key.is_empty() {
            return Ok(None);
        }
        let by_id = self.records.iter().find(|record| record.id == key);
        Ok(by_id
            .or_else(|| self.records.iter().find(|record| record.name == key))
            .cloned())
    }

    async fn all_records(&self) -> CollaboratorResult<Arc<Vec<RecipeRecord>>> {
        Ok(Arc::clone(&self.records))
    }
}
