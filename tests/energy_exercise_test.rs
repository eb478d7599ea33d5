// ABOUTME: Integration tests for the energy model and the exercise recommender
// ABOUTME: Checks daily energy for reference profiles and rounding drift across the catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use hansik_core::models::{ActivityLevel, BodyProfile, Intensity, Sex};
use hansik_intelligence::config::EpocConfig;
use hansik_intelligence::exercise::EXERCISE_CATALOG;
use hansik_intelligence::{EnergyConfig, EnergyModel, ExerciseRecommender};

fn male(weight_kg: f64, age_years: u32) -> BodyProfile {
    BodyProfile::new(weight_kg, 175.0, age_years, Sex::Male, ActivityLevel::Moderate).unwrap()
}

#[test]
fn test_default_profile_daily_energy() {
    let energy = EnergyModel::default().daily_energy(&BodyProfile::default());
    // 650 + 1062.5 - 150 + 5
    assert!((energy.bmr_kcal - 1567.5).abs() < 1e-9);
    assert!((energy.tdee_kcal - 2429.6).abs() < 1e-9);
}

#[test]
fn test_activity_level_scales_tdee() {
    let model = EnergyModel::default();
    let levels = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];
    let tdees: Vec<f64> = levels
        .iter()
        .map(|level| {
            let profile = BodyProfile::new(70.0, 175.0, 25, Sex::Male, *level).unwrap();
            model.tdee(&profile)
        })
        .collect();
    assert!(tdees.windows(2).all(|pair| pair[0] < pair[1]));
    assert!((tdees[2] - 2594.4).abs() < 1e-9);
}

#[test]
fn test_rounding_drift_is_bounded_across_catalog() {
    let model = EnergyModel::default();
    let profile = male(70.0, 30);
    for option in EXERCISE_CATALOG {
        let epoc = model.config().epoc.factor(option.intensity);
        let per_tenth_minute = option.met * profile.weight_kg() * (1.0 + epoc) * 0.1 / 60.0;
        for target in [45.0, 180.0, 523.7, 1200.0] {
            let minutes =
                model.duration_for_calories(option.met, profile.weight_kg(), target, option.intensity);
            let achieved =
                model.calories_burned(option.met, profile.weight_kg(), minutes, option.intensity);
            assert!(
                (achieved - target).abs() <= per_tenth_minute + 0.05,
                "{} drifted: target {target}, achieved {achieved}",
                option.canonical_key
            );
        }
    }
}

#[test]
fn test_heavier_profile_needs_less_time() {
    let recommender = ExerciseRecommender::default();
    let light = recommender.recommend_one_per_tier(400.0, &male(55.0, 30));
    let heavy = recommender.recommend_one_per_tier(400.0, &male(95.0, 30));
    for tier in Intensity::ALL {
        assert!(heavy[&tier].duration_minutes < light[&tier].duration_minutes);
    }
}

#[test]
fn test_tiers_iterate_low_to_high() {
    let recs = ExerciseRecommender::default().recommend_one_per_tier(250.0, &male(70.0, 30));
    let tiers: Vec<Intensity> = recs.keys().copied().collect();
    assert_eq!(tiers, Intensity::ALL);
    assert!(recs.values().all(|rec| rec.intensity() == rec.option.intensity));
}

#[test]
fn test_custom_epoc_shortens_duration() {
    let config = EnergyConfig {
        epoc: EpocConfig {
            low: 0.5,
            medium: 0.5,
            high: 0.5,
        },
        ..EnergyConfig::default()
    };
    let profile = male(70.0, 30);
    let standard = ExerciseRecommender::default().recommend_one_per_tier(300.0, &profile);
    let boosted = ExerciseRecommender::new(EnergyModel::new(config)).recommend_one_per_tier(300.0, &profile);
    for tier in Intensity::ALL {
        assert!(boosted[&tier].duration_minutes < standard[&tier].duration_minutes);
    }
}

#[test]
fn test_profile_deserialization_validates() {
    let profile: BodyProfile =
        serde_json::from_str(r#"{"weight_kg": 58.0, "height_cm": 162.0, "age_years": 41}"#).unwrap();
    assert_eq!(profile.sex(), Sex::Male);
    assert_eq!(profile.activity_level(), ActivityLevel::Moderate);

    let rejected = serde_json::from_str::<BodyProfile>(
        r#"{"weight_kg": 0.0, "height_cm": 162.0, "age_years": 41}"#,
    );
    assert!(rejected.is_err());
}
