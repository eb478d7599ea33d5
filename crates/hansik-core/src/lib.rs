// ABOUTME: Core types for the hansik Korean food query pipeline
// ABOUTME: Foundation crate with error handling, domain models, and shared constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Hansik Core
//!
//! Foundation crate providing shared types for the food query pipeline. It is
//! designed to change infrequently so the pipeline and intelligence crates can
//! compile against a stable surface.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and `CollaboratorError`
//! - **models**: profiles, queries, recipes, nutrition, and exercise entries
//! - **constants**: defaults and tuning values organized by domain
//! - **precision**: rounding used for every reported quantity

/// Unified error handling with standard error codes
pub mod errors;

/// Constants organized by domain
pub mod constants;

/// Core data models
pub mod models;

/// Decimal rounding helpers
pub mod precision;
