// ABOUTME: Main library entry point for the hansik Korean food query pipeline
// ABOUTME: Resolves a dish, scales its nutrition, and sizes exercise to burn it off
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Hansik Fit
//!
//! Answers Korean food questions such as "된장국 2인분 칼로리" with a recipe,
//! meal-total nutrition, and exercise durations that burn the same energy.
//!
//! ## Architecture
//!
//! - **pipeline**: the staged [`Pipeline`] and its per-request [`PipelineState`]
//! - **collaborators**: async contracts for the model, index, and stores
//! - **stores**: JSON recipe catalog, `SQLite` nutrition table, flat vector index
//! - **llm**: OpenAI-compatible chat and embedding client
//! - **config** / **logging**: environment-driven runtime setup
//!
//! Energy formulas and the exercise catalog live in `hansik-intelligence`;
//! shared models and errors live in `hansik-core`.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use hansik_fit::pipeline::{Pipeline, PipelineDeps};
//!
//! #[tokio::main]
//! async fn main() {
//!     let pipeline = Pipeline::new(PipelineDeps::default());
//!     let state = pipeline.resolve_and_compute("된장국 2인분", None).await;
//!     println!("{}", state.response);
//! }
//! ```

/// External collaborator contracts and model-backed implementations
pub mod collaborators;

/// Environment-based configuration
pub mod config;

/// Error types shared with `hansik-core`
pub mod errors;

/// Language model client and prompts
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Pipeline stages and orchestrator
pub mod pipeline;

/// Data stores backing the collaborator contracts
pub mod stores;

pub use pipeline::{Pipeline, PipelineDeps, PipelineState};
