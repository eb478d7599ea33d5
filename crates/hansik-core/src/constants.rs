// ABOUTME: Shared constants for profile defaults and bounds, query limits, resolution, and nutrition
// ABOUTME: Grouped by domain so call sites read as `resolution::VECTOR_TOP_K`
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Body profile used when a request carries none
pub mod profile_defaults {
    /// Default body weight (kg)
    pub const WEIGHT_KG: f64 = 65.0;
    /// Default height (cm)
    pub const HEIGHT_CM: f64 = 170.0;
    /// Default age (years)
    pub const AGE_YEARS: u32 = 30;
}

/// Inclusive limits for caller-supplied body measurements
pub mod profile_bounds {
    /// Lightest accepted body weight (kg)
    pub const MIN_WEIGHT_KG: f64 = 30.0;
    /// Heaviest accepted body weight (kg)
    pub const MAX_WEIGHT_KG: f64 = 200.0;
    /// Shortest accepted height (cm)
    pub const MIN_HEIGHT_CM: f64 = 100.0;
    /// Tallest accepted height (cm)
    pub const MAX_HEIGHT_CM: f64 = 250.0;
    /// Youngest accepted age (years)
    pub const MIN_AGE_YEARS: u32 = 10;
    /// Oldest accepted age (years)
    pub const MAX_AGE_YEARS: u32 = 100;
}

/// Query text limits
pub mod query {
    /// Longest accepted query, counted in characters
    pub const MAX_CHARS: usize = 200;
}

/// Recipe resolution tuning
pub mod resolution {
    /// Neighbors requested from the embedding index
    pub const VECTOR_TOP_K: usize = 5;
    /// Minimum similarity for an embedding neighbor
    pub const SIMILARITY_FLOOR: f64 = 0.5;
    /// Largest absolute length difference always accepted by the containment gate
    pub const CONTAINMENT_MAX_ABS_DIFF: usize = 1;
    /// Query length from which the relative gate applies
    pub const CONTAINMENT_RELATIVE_MIN_QUERY_LEN: usize = 4;
    /// Relative length difference accepted for longer queries
    pub const CONTAINMENT_MAX_RELATIVE_DIFF: f64 = 0.25;
}

/// Nutrition lookup
pub mod nutrition {
    /// Serving weight assumed when a source omits it (g)
    pub const DEFAULT_SERVING_SIZE_G: f64 = 100.0;
    /// Candidates requested from the similarity search
    pub const SIMILAR_LIMIT: usize = 3;
}
