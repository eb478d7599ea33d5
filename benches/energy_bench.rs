// ABOUTME: Criterion benchmarks for energy formulas, exercise sizing, and the full pipeline
// ABOUTME: Measures pure computation paths and an in-memory end-to-end request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the food query pipeline.
//!
//! Covers the energy model, exercise recommendation, rule-based parsing,
//! and one end-to-end request against an in-memory catalog.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hansik_core::models::{ActivityLevel, BodyProfile, Intensity, NutrientSet, RecipeRecord, Sex};
use hansik_fit::collaborators::RecipeStore;
use hansik_fit::pipeline::parse_with_rules;
use hansik_fit::stores::JsonRecipeCatalog;
use hansik_fit::{Pipeline, PipelineDeps};
use hansik_intelligence::{EnergyModel, ExerciseRecommender};
use tokio::runtime::Runtime;

/// Catalog size for the end-to-end benchmark
const CATALOG_SIZE: usize = 2_000;

fn bench_profiles() -> Vec<BodyProfile> {
    (0..50_u32)
        .filter_map(|index| {
            let sex = if index % 2 == 0 { Sex::Male } else { Sex::Female };
            BodyProfile::new(
                50.0 + f64::from(index),
                150.0 + f64::from(index % 40),
                20 + index,
                sex,
                ActivityLevel::Light,
            )
            .ok()
        })
        .collect()
}

fn bench_catalog() -> Arc<dyn RecipeStore> {
    let mut records: Vec<RecipeRecord> = (0..CATALOG_SIZE)
        .map(|index| RecipeRecord {
            id: format!("B-{index}"),
            name: format!("벤치마크요리{index}"),
            ..RecipeRecord::default()
        })
        .collect();
    records.push(RecipeRecord {
        id: "B-target".to_owned(),
        name: "된장찌개".to_owned(),
        ingredients: vec!["된장 2큰술".to_owned(), "두부 1/2모".to_owned()],
        embedded_nutrition: Some(NutrientSet {
            energy_kcal: 150.0,
            ..NutrientSet::default()
        }),
        ..RecipeRecord::default()
    });
    Arc::new(JsonRecipeCatalog::from_records(records))
}

fn bench_energy_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("energy_model");
    let model = EnergyModel::default();
    let profiles = bench_profiles();

    group.throughput(Throughput::Elements(profiles.len() as u64));
    group.bench_function("daily_energy_50_profiles", |b| {
        b.iter(|| {
            for profile in &profiles {
                black_box(model.daily_energy(black_box(profile)));
            }
        });
    });

    group.bench_function("duration_for_calories", |b| {
        b.iter(|| {
            model.duration_for_calories(
                black_box(8.0),
                black_box(70.0),
                black_box(450.0),
                Intensity::High,
            )
        });
    });
    group.finish();
}

fn bench_recommender(c: &mut Criterion) {
    let mut group = c.benchmark_group("exercise_recommender");
    let recommender = ExerciseRecommender::default();
    let profile = BodyProfile::default();

    for target in [120.0, 600.0, 1800.0] {
        group.bench_with_input(
            BenchmarkId::new("one_per_tier", target),
            &target,
            |b, &target| {
                b.iter(|| recommender.recommend_one_per_tier(black_box(target), &profile));
            },
        );
    }

    group.bench_function("recommend_many_all_tiers", |b| {
        b.iter(|| recommender.recommend_many(black_box(600.0), &profile, None));
    });
    group.finish();
}

fn bench_rule_parsing(c: &mut Criterion) {
    let queries = [
        "된장찌개 2인분 칼로리 알려줘",
        "김치볶음밥 만드는 법",
        "삼겹살 3인분 먹으면 운동 얼마나 해야 돼?",
        "비빔밥",
    ];
    let mut group = c.benchmark_group("query_rules");
    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("parse_4_queries", |b| {
        b.iter(|| {
            for query in queries {
                black_box(parse_with_rules(black_box(query)));
            }
        });
    });
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let Ok(runtime) = Runtime::new() else {
        return;
    };
    let pipeline = Arc::new(Pipeline::new(PipelineDeps {
        recipe_store: Some(bench_catalog()),
        ..PipelineDeps::default()
    }));

    let mut group = c.benchmark_group("pipeline");
    group.sample_size(50);
    group.bench_function("resolve_and_compute_exact_hit", |b| {
        b.to_async(&runtime).iter(|| {
            let pipeline = Arc::clone(&pipeline);
            async move { pipeline.resolve_and_compute("된장찌개 2인분", None).await }
        });
    });
    group.bench_function("resolve_and_compute_unresolved_scan", |b| {
        b.to_async(&runtime).iter(|| {
            let pipeline = Arc::clone(&pipeline);
            async move { pipeline.resolve_and_compute("없는요리", None).await }
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_energy_model,
    bench_recommender,
    bench_rule_parsing,
    bench_pipeline
);
criterion_main!(benches);
