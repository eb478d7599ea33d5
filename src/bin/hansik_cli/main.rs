// ABOUTME: Hansik CLI - answer food queries and run the energy calculations from a terminal
// ABOUTME: Subcommands for full pipeline answers, daily energy, and exercise listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Answer a query with the configured catalogs and model
//! hansik-cli ask "된장국 2인분 칼로리"
//!
//! # Same, for a specific profile, printing the full pipeline state
//! hansik-cli ask "비빔밥" --weight 58 --height 162 --age 27 --sex female --json
//!
//! # Resting and daily energy expenditure
//! hansik-cli energy --weight 70 --height 175 --age 30 --activity active
//!
//! # Activities that burn 450 kcal, high intensity only
//! hansik-cli exercises 450 --intensity high
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use hansik_core::constants::profile_defaults;
use hansik_core::models::{ActivityLevel, BodyProfile, Intensity, Sex};
use hansik_fit::config::ServerConfig;
use hansik_fit::logging::LoggingConfig;
use hansik_fit::Pipeline;
use hansik_intelligence::{EnergyModel, ExerciseRecommender};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "hansik-cli",
    about = "Korean food recipes, nutrition, and calorie-matched exercise",
    long_about = "Resolve Korean dishes to recipes, scale their nutrition to the requested servings, and size exercise sessions that burn the same energy."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log with the RUST_LOG / LOG_FORMAT settings instead of warnings only
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Answer a free-text food query
    Ask {
        /// Query text, e.g. "김치찌개 2인분 레시피"
        query: String,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Print the whole pipeline state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show BMR and TDEE for a profile
    Energy {
        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// List activities sized to burn a calorie target
    Exercises {
        /// Calories to burn (kcal)
        kcal: f64,

        /// Restrict to one tier (low, medium, high)
        #[arg(long)]
        intensity: Option<String>,

        #[command(flatten)]
        profile: ProfileArgs,
    },
}

#[derive(Args)]
struct ProfileArgs {
    /// Body weight in kg (30-200)
    #[arg(long, default_value_t = profile_defaults::WEIGHT_KG)]
    weight: f64,

    /// Height in cm (100-250)
    #[arg(long, default_value_t = profile_defaults::HEIGHT_CM)]
    height: f64,

    /// Age in years (10-100)
    #[arg(long, default_value_t = profile_defaults::AGE_YEARS)]
    age: u32,

    /// male or female
    #[arg(long, default_value = "male")]
    sex: String,

    /// sedentary, light, moderate, active, or very_active
    #[arg(long, default_value = "moderate")]
    activity: String,
}

impl ProfileArgs {
    fn to_profile(&self) -> Result<BodyProfile> {
        let sex: Sex = self.sex.parse()?;
        let activity: ActivityLevel = self.activity.parse()?;
        Ok(BodyProfile::new(
            self.weight,
            self.height,
            self.age,
            sex,
            activity,
        )?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = if cli.verbose {
        LoggingConfig::from_env()
    } else {
        LoggingConfig::quiet()
    };
    logging.init()?;

    match cli.command {
        Command::Ask {
            query,
            profile,
            json,
        } => ask(&query, &profile, json).await,
        Command::Energy { profile } => energy(&profile),
        Command::Exercises {
            kcal,
            intensity,
            profile,
        } => exercises(kcal, intensity.as_deref(), &profile),
    }
}

async fn ask(query: &str, profile: &ProfileArgs, json: bool) -> Result<()> {
    let profile = profile.to_profile()?;
    let config = ServerConfig::from_env().context("Failed to load configuration")?;
    let pipeline = Pipeline::from_config(&config)
        .await
        .context("Failed to initialize pipeline")?;

    let state = pipeline.resolve_and_compute(query, Some(profile)).await;
    info!(request_id = %state.request_id, "Query answered");

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        println!("{}", state.response);
        if let Some(error) = &state.error {
            eprintln!("warning: {error}");
        }
    }
    Ok(())
}

fn energy(profile: &ProfileArgs) -> Result<()> {
    let profile = profile.to_profile()?;
    let daily = EnergyModel::default().daily_energy(&profile);
    println!("BMR:  {:.1} kcal/day", daily.bmr_kcal);
    println!(
        "TDEE: {:.1} kcal/day ({})",
        daily.tdee_kcal,
        profile.activity_level()
    );
    Ok(())
}

fn exercises(kcal: f64, intensity: Option<&str>, profile: &ProfileArgs) -> Result<()> {
    let profile = profile.to_profile()?;
    let filter = intensity.map(str::parse::<Intensity>).transpose()?;
    let recommendations =
        ExerciseRecommender::default().recommend_many(kcal, &profile, filter);

    if recommendations.is_empty() {
        println!("No exercise needed for {kcal:.0} kcal");
        return Ok(());
    }

    println!("{kcal:.0} kcal를 소모하기 위한 운동:");
    for recommendation in &recommendations {
        let option = recommendation.option;
        println!(
            "- [{}] {} ({}): {:.1}분, {:.1} kcal",
            recommendation.intensity().local_label(),
            option.display_name_local,
            option.display_name_en,
            recommendation.duration_minutes,
            recommendation.calories_burned
        );
    }
    Ok(())
}
