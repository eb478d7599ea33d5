// ABOUTME: Error types for the pipeline crate, re-exported from hansik-core
// ABOUTME: Keeps `crate::errors::AppError` paths stable for every module and binary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Unified error handling
//!
//! `AppError` carries an [`ErrorCode`] and message for precondition and
//! infrastructure failures. Collaborator calls return [`CollaboratorError`]
//! instead, so the pipeline can pick the next fallback by matching on the kind.

pub use hansik_core::errors::{
    AppError, AppResult, CollaboratorError, CollaboratorResult, ErrorCode,
};
