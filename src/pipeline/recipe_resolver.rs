// ABOUTME: Tiered recipe resolution: exact name, gated containment, then embedding similarity
// ABOUTME: Produces either a catalog record or a request for generative fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe Resolution
//!
//! Tiers short-circuit in order:
//!
//! 1. **Exact**: first record whose name equals the query.
//! 2. **Containment**: shortest name containing the query, accepted only when
//!    it passes [`passes_containment_gate`]. A rejected candidate ends
//!    resolution with its image reference as a hint for generation.
//! 3. **Vector**: embedding neighbors above the similarity floor, preferring
//!    one whose name contains the query.
//!
//! Anything else needs generation. Store and index failures are logged and
//! treated as "no match" for their tier.

use std::sync::Arc;
use std::time::Duration;

use hansik_core::constants::resolution::{
    CONTAINMENT_MAX_ABS_DIFF, CONTAINMENT_MAX_RELATIVE_DIFF, CONTAINMENT_RELATIVE_MIN_QUERY_LEN,
};
use hansik_core::models::{MatchTier, RecipeRecord};
use tracing::{debug, info, warn};

use crate::collaborators::{service, with_deadline, EmbeddingIndex, RecipeStore, SimilarityHit};
use crate::config::ResolutionConfig;
use crate::errors::CollaboratorError;

/// Outcome of recipe resolution
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeResolution {
    /// A catalog record matched
    Resolved {
        /// Full catalog record
        recipe: RecipeRecord,
        /// Tier that produced the match
        tier: MatchTier,
    },
    /// No acceptable record; the dish must be generated
    NeedsGeneration {
        /// Image of a rejected containment candidate
        image_hint: Option<String>,
    },
}

impl RecipeResolution {
    /// Resolved record, if any
    #[must_use]
    pub const fn recipe(&self) -> Option<&RecipeRecord> {
        match self {
            Self::Resolved { recipe, .. } => Some(recipe),
            Self::NeedsGeneration { .. } => None,
        }
    }

    /// Matching tier, if any
    #[must_use]
    pub const fn tier(&self) -> Option<MatchTier> {
        match self {
            Self::Resolved { tier, .. } => Some(*tier),
            Self::NeedsGeneration { .. } => None,
        }
    }
}

/// Near-identity check between a query and a containing candidate name.
///
/// Lengths are in characters. A difference of at most one is always
/// accepted; queries of four or more characters also accept a difference up
/// to a quarter of the query length.
#[must_use]
pub fn passes_containment_gate(query_len: usize, candidate_len: usize) -> bool {
    let diff = candidate_len.abs_diff(query_len);
    if diff <= CONTAINMENT_MAX_ABS_DIFF {
        return true;
    }
    let relative_ok = diff as f64 <= query_len as f64 * CONTAINMENT_MAX_RELATIVE_DIFF;
    query_len >= CONTAINMENT_RELATIVE_MIN_QUERY_LEN && relative_ok
}

/// Shortest record whose name contains `query`; ties keep catalog order
fn shortest_containing<'a>(records: &'a [RecipeRecord], query: &str) -> Option<&'a RecipeRecord> {
    records
        .iter()
        .filter(|record| record.name.contains(query))
        .min_by_key(|record| record.name_len())
}

/// Recipe resolution stage
#[derive(Clone)]
pub struct RecipeResolver {
    store: Option<Arc<dyn RecipeStore>>,
    index: Option<Arc<dyn EmbeddingIndex>>,
    config: ResolutionConfig,
    deadline: Duration,
}

impl RecipeResolver {
    /// Resolver over an optional catalog and optional embedding index
    #[must_use]
    pub fn new(
        store: Option<Arc<dyn RecipeStore>>,
        index: Option<Arc<dyn EmbeddingIndex>>,
        config: ResolutionConfig,
        deadline: Duration,
    ) -> Self {
        Self {
            store,
            index,
            config,
            deadline,
        }
    }

    /// Resolve a food name to a catalog record
    pub async fn resolve(&self, food_name: &str) -> RecipeResolution {
        if food_name.is_empty() {
            debug!("Empty food name, skipping recipe lookup");
            return RecipeResolution::NeedsGeneration { image_hint: None };
        }

        let records = match &self.store {
            Some(store) => {
                match with_deadline(service::RECIPE_STORE, self.deadline, store.all_records()).await
                {
                    Ok(records) => records,
                    Err(e) => {
                        log_tier_failure("catalog", &e);
                        Arc::new(Vec::new())
                    }
                }
            }
            None => Arc::new(Vec::new()),
        };

        if let Some(record) = records.iter().find(|record| record.name == food_name) {
            info!(food_name, recipe_id = %record.id, "Exact recipe match");
            return self.resolved(record.clone(), MatchTier::Exact).await;
        }

        if let Some(candidate) = shortest_containing(&records, food_name) {
            let query_len = food_name.chars().count();
            let candidate_len = candidate.name_len();
            if passes_containment_gate(query_len, candidate_len) {
                info!(
                    food_name,
                    candidate = %candidate.name,
                    "Containment recipe match"
                );
                return self.resolved(candidate.clone(), MatchTier::Containment).await;
            }
            info!(
                food_name,
                candidate = %candidate.name,
                query_len,
                candidate_len,
                "Containment candidate rejected, generation needed"
            );
            let image_hint = Some(candidate.image_ref.clone()).filter(|image| !image.is_empty());
            return RecipeResolution::NeedsGeneration { image_hint };
        }

        if let Some(hit) = self.vector_match(food_name).await {
            info!(
                food_name,
                neighbor = %hit.name,
                similarity = hit.similarity,
                "Vector recipe match"
            );
            let fallback = RecipeRecord {
                id: hit.record_id.clone(),
                name: hit.name.clone(),
                ..RecipeRecord::default()
            };
            let recipe = match self.lookup(&hit.record_id).await {
                Some(recipe) => Some(recipe),
                None => self.lookup(&hit.name).await,
            }
            .unwrap_or(fallback);
            return RecipeResolution::Resolved {
                recipe,
                tier: MatchTier::Vector,
            };
        }

        debug!(food_name, "No recipe match");
        RecipeResolution::NeedsGeneration { image_hint: None }
    }

    async fn resolved(&self, matched: RecipeRecord, tier: MatchTier) -> RecipeResolution {
        let key = if matched.id.is_empty() {
            matched.name.as_str()
        } else {
            matched.id.as_str()
        };
        let found = self.lookup(key).await;
        RecipeResolution::Resolved {
            recipe: found.unwrap_or(matched),
            tier,
        }
    }

    async fn lookup(&self, key: &str) -> Option<RecipeRecord> {
        let store = self.store.as_ref()?;
        match with_deadline(
            service::RECIPE_STORE,
            self.deadline,
            store.find_by_id_or_name(key),
        )
        .await
        {
            Ok(found) => found,
            Err(e) => {
                log_tier_failure("lookup", &e);
                None
            }
        }
    }

    async fn vector_match(&self, food_name: &str) -> Option<SimilarityHit> {
        let index = self.index.as_ref()?;
        let hits = match with_deadline(
            service::EMBEDDING_INDEX,
            self.deadline,
            index.search(
                food_name,
                self.config.vector_top_k,
                self.config.similarity_floor,
            ),
        )
        .await
        {
            Ok(hits) => hits,
            Err(e) => {
                log_tier_failure("vector", &e);
                return None;
            }
        };
        let position = hits
            .iter()
            .position(|hit| hit.name.contains(food_name))
            .unwrap_or(0);
        hits.into_iter().nth(position)
    }
}

fn log_tier_failure(tier: &str, error: &CollaboratorError) {
    warn!(
        tier,
        service = error.service(),
        error.kind = error.kind(),
        error = %error,
        "Recipe tier unavailable, treating as no match"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_absolute_difference() {
        assert!(passes_containment_gate(2, 3));
        assert!(passes_containment_gate(3, 3));
        assert!(!passes_containment_gate(2, 4));
    }

    #[test]
    fn test_gate_relative_difference() {
        // 8 * 0.25 = 2
        assert!(passes_containment_gate(8, 10));
        assert!(!passes_containment_gate(8, 11));
        // Relative rule needs at least four characters
        assert!(!passes_containment_gate(3, 5));
    }

    #[test]
    fn test_gate_kimchi_stew_rejected() {
        let query = "김치찌개".chars().count();
        let candidate = "얼큰 김치찌개".chars().count();
        assert_eq!((query, candidate), (4, 7));
        assert!(!passes_containment_gate(query, candidate));
    }

    #[test]
    fn test_shortest_containing_keeps_catalog_order_on_ties() {
        let records = vec![
            RecipeRecord::placeholder("두부된장국", None),
            RecipeRecord::placeholder("된장국밥", None),
            RecipeRecord::placeholder("된장국수", None),
            RecipeRecord::placeholder("된장", None),
        ];
        let found = shortest_containing(&records, "된장국").map(|r| r.name.as_str());
        assert_eq!(found, Some("된장국밥"));
    }
}
