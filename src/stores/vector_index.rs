// ABOUTME: Exhaustive L2 nearest-neighbor index over recipe name embeddings
// ABOUTME: Scans entries in parallel with rayon and scores neighbors as 1 / (1 + distance)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Flat Vector Index
//!
//! Entries are compared with squared Euclidean distance, the same metric a
//! flat L2 index reports, and converted to a similarity in (0, 1] with
//! `1 / (1 + d)`. The query text is embedded through an
//! [`EmbeddingProvider`] at search time.
//!
//! Index file layout:
//!
//! ```json
//! {"entries": [{"id": "R-1", "name": "된장국", "embedding": [0.1, 0.2]}]}
//! ```

use std::cmp::Ordering;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};

use crate::collaborators::{service, EmbeddingIndex, SimilarityHit};
use crate::errors::{AppError, AppResult, CollaboratorError, CollaboratorResult, ErrorCode};
use crate::llm::EmbeddingProvider;

/// One indexed recipe name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Recipe catalog id
    #[serde(alias = "recipe_id")]
    pub id: String,
    /// Recipe name
    pub name: String,
    /// Name embedding
    pub embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct IndexFile {
    entries: Vec<IndexEntry>,
}

/// Exhaustive-scan index shared read-only across requests
pub struct FlatVectorIndex {
    entries: Arc<Vec<IndexEntry>>,
    dimension: usize,
    embedder: Arc<dyn EmbeddingProvider>,
}

/// Squared Euclidean distance
fn squared_l2(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = f64::from(*x) - f64::from(*y);
            d * d
        })
        .sum()
}

/// Map a distance onto (0, 1]
#[must_use]
pub fn similarity_from_distance(distance: f64) -> f64 {
    1.0 / (1.0 + distance)
}

impl FlatVectorIndex {
    /// Build an index from entries; every embedding must share one dimension
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error on empty or mismatched embeddings
    pub fn new(entries: Vec<IndexEntry>, embedder: Arc<dyn EmbeddingProvider>) -> AppResult<Self> {
        let dimension = entries.first().map_or(0, |entry| entry.embedding.len());
        if let Some(bad) = entries
            .iter()
            .find(|entry| entry.embedding.is_empty() || entry.embedding.len() != dimension)
        {
            return Err(AppError::invalid_input(format!(
                "embedding for {:?} has dimension {}, expected {dimension}",
                bad.name,
                bad.embedding.len()
            )));
        }
        Ok(Self {
            entries: Arc::new(entries),
            dimension,
            embedder,
        })
    }

    /// Load an index file
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read, parsed, or validated
    pub async fn load(
        path: impl AsRef<Path>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> AppResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).await?;
        let file: IndexFile = serde_json::from_str(&text)?;
        let index = Self::new(file.entries, embedder)?;
        info!(
            path = %path.display(),
            entries = index.len(),
            dimension = index.dimension,
            "Loaded vector index"
        );
        Ok(index)
    }

    /// Number of indexed entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nearest `top_k` entries to `query` as `(entry index, distance)`, closest first.
    ///
    /// Equal distances keep index order.
    #[must_use]
    pub fn nearest(&self, query: &[f32], top_k: usize) -> Vec<(usize, f64)> {
        let mut scored: Vec<(usize, f64)> = self
            .entries
            .par_iter()
            .enumerate()
            .map(|(position, entry)| (position, squared_l2(query, &entry.embedding)))
            .collect();
        scored.sort_by(|a, b| match a.1.total_cmp(&b.1) {
            Ordering::Equal => a.0.cmp(&b.0),
            other => other,
        });
        scored.truncate(top_k);
        scored
    }
}

#[async_trait]
impl EmbeddingIndex for FlatVectorIndex {
    async fn search(
        &self,
        text: &str,
        top_k: usize,
        floor: f64,
    ) -> CollaboratorResult<Vec<SimilarityHit>> {
        if self.entries.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }
        let query = self.embedder.embed(text).await.map_err(|e| match e.code {
            ErrorCode::ExternalServiceUnavailable => CollaboratorError::Unavailable {
                service: service::EMBEDDING_INDEX,
            },
            _ => CollaboratorError::failed(service::EMBEDDING_INDEX, e),
        })?;
        if query.len() != self.dimension {
            return Err(CollaboratorError::malformed(
                service::EMBEDDING_INDEX,
                format!(
                    "query embedding has dimension {}, index expects {}",
                    query.len(),
                    self.dimension
                ),
            ));
        }

        let hits: Vec<SimilarityHit> = self
            .nearest(&query, top_k)
            .into_iter()
            .map(|(position, distance)| {
                let entry = &self.entries[position];
                SimilarityHit {
                    record_id: entry.id.clone(),
                    name: entry.name.clone(),
                    similarity: similarity_from_distance(distance),
                }
            })
            .filter(|hit| hit.similarity >= floor)
            .collect();
        debug!(text, top_k, floor, hits = hits.len(), "Vector search");
        Ok(hits)
    }
}
