// ABOUTME: Converts a calorie target into per-tier exercise durations
// ABOUTME: Fixed representative activities per tier plus capped alternative listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use hansik_core::models::{BodyProfile, ExerciseOption, ExerciseRecommendation, Intensity};
use tracing::debug;

use super::catalog;
use crate::algorithms::EnergyModel;

/// Alternatives listed per tier by [`ExerciseRecommender::recommend_many`]
pub const ALTERNATIVES_PER_TIER: usize = 3;

/// Representative activity for each tier
const REPRESENTATIVES: [(Intensity, &str); 3] = [
    (Intensity::Low, "walking_moderate"),
    (Intensity::Medium, "cycling_leisure"),
    (Intensity::High, "running_slow"),
];

/// Ordered candidate keys per tier for alternative listings
const ALTERNATIVES: [(Intensity, &[&str]); 3] = [
    (
        Intensity::Low,
        &["walking_moderate", "yoga_hatha", "stretching", "pilates_beginner"],
    ),
    (
        Intensity::Medium,
        &[
            "walking_brisk",
            "cycling_leisure",
            "swimming_leisure",
            "badminton",
            "yoga_power",
        ],
    ),
    (
        Intensity::High,
        &[
            "running_slow",
            "running_moderate",
            "jump_rope",
            "swimming_laps",
            "hiit",
            "cycling_vigorous",
        ],
    ),
];

/// One recommendation per tier, iterated low to high
pub type TierRecommendations = BTreeMap<Intensity, ExerciseRecommendation>;

/// Selects catalog activities and sizes them against a calorie target
#[derive(Debug, Clone, Default)]
pub struct ExerciseRecommender {
    energy: EnergyModel,
}

impl ExerciseRecommender {
    /// Create a recommender on top of an energy model
    #[must_use]
    pub const fn new(energy: EnergyModel) -> Self {
        Self { energy }
    }

    /// Energy model used for the conversions
    #[must_use]
    pub const fn energy_model(&self) -> &EnergyModel {
        &self.energy
    }

    /// Size one activity against a calorie target.
    ///
    /// The reported calories are recomputed from the rounded duration, so they
    /// may differ from `target_calories` by up to one tenth of a minute of work.
    #[must_use]
    pub fn recommend(
        &self,
        option: &'static ExerciseOption,
        target_calories: f64,
        profile: &BodyProfile,
    ) -> ExerciseRecommendation {
        let weight = profile.weight_kg();
        let duration_minutes =
            self.energy
                .duration_for_calories(option.met, weight, target_calories, option.intensity);
        let calories_burned =
            self.energy
                .calories_burned(option.met, weight, duration_minutes, option.intensity);
        ExerciseRecommendation {
            option,
            duration_minutes,
            calories_burned,
        }
    }

    /// One fixed representative activity per tier.
    ///
    /// Returns an empty map when `target_calories <= 0`.
    #[must_use]
    pub fn recommend_one_per_tier(
        &self,
        target_calories: f64,
        profile: &BodyProfile,
    ) -> TierRecommendations {
        if target_calories <= 0.0 {
            debug!(target_calories, "No positive calorie target, skipping recommendations");
            return TierRecommendations::new();
        }
        REPRESENTATIVES
            .iter()
            .filter_map(|(tier, key)| catalog::find(key).map(|option| (*tier, option)))
            .map(|(tier, option)| (tier, self.recommend(option, target_calories, profile)))
            .collect()
    }

    /// Up to three alternatives per tier, or for a single tier when filtered.
    ///
    /// Order is deterministic: tiers low to high, candidates in their listed order.
    #[must_use]
    pub fn recommend_many(
        &self,
        target_calories: f64,
        profile: &BodyProfile,
        intensity_filter: Option<Intensity>,
    ) -> Vec<ExerciseRecommendation> {
        if target_calories <= 0.0 {
            return Vec::new();
        }
        ALTERNATIVES
            .iter()
            .filter(|(tier, _)| intensity_filter.is_none_or(|wanted| wanted == *tier))
            .flat_map(|(_, keys)| {
                keys.iter()
                    .filter_map(|key| catalog::find(key))
                    .take(ALTERNATIVES_PER_TIER)
            })
            .map(|option| self.recommend(option, target_calories, profile))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use hansik_core::models::{ActivityLevel, Sex};

    fn profile() -> BodyProfile {
        BodyProfile::new(70.0, 175.0, 30, Sex::Male, ActivityLevel::Moderate).unwrap()
    }

    #[test]
    fn test_every_listed_key_exists() {
        for (_, key) in REPRESENTATIVES {
            assert!(catalog::find(key).is_some(), "missing representative {key}");
        }
        for (tier, keys) in ALTERNATIVES {
            for key in keys {
                let option = catalog::find(key).unwrap();
                assert_eq!(option.intensity, tier, "{key} listed under wrong tier");
            }
        }
    }

    #[test]
    fn test_one_per_tier_uses_fixed_representatives() {
        let recs = ExerciseRecommender::default().recommend_one_per_tier(500.0, &profile());
        let keys: Vec<_> = recs.values().map(|r| r.option.canonical_key).collect();
        assert_eq!(keys, ["walking_moderate", "cycling_leisure", "running_slow"]);
    }

    #[test]
    fn test_non_positive_target_is_empty() {
        let recommender = ExerciseRecommender::default();
        assert!(recommender.recommend_one_per_tier(0.0, &profile()).is_empty());
        assert!(recommender.recommend_one_per_tier(-10.0, &profile()).is_empty());
        assert!(recommender.recommend_many(0.0, &profile(), None).is_empty());
    }

    #[test]
    fn test_recommend_many_caps_three_per_tier() {
        let recs = ExerciseRecommender::default().recommend_many(300.0, &profile(), None);
        let keys: Vec<_> = recs.iter().map(|r| r.option.canonical_key).collect();
        assert_eq!(
            keys,
            [
                "walking_moderate",
                "yoga_hatha",
                "stretching",
                "walking_brisk",
                "cycling_leisure",
                "swimming_leisure",
                "running_slow",
                "running_moderate",
                "jump_rope",
            ]
        );
    }

    #[test]
    fn test_recommend_many_filter() {
        let recs =
            ExerciseRecommender::default().recommend_many(300.0, &profile(), Some(Intensity::High));
        assert_eq!(recs.len(), 3);
        assert!(recs.iter().all(|r| r.intensity() == Intensity::High));
    }
}
