// ABOUTME: Unified error handling with AppError, ErrorCode, and collaborator error kinds
// ABOUTME: Single error currency shared by the core, intelligence, and pipeline crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in the workspace returns [`AppResult`]. Errors carry a
//! stable [`ErrorCode`], a human-readable message, and an optional chained source.
//!
//! External collaborators (language model, embedding index, record stores) report
//! failures through [`CollaboratorError`] instead, so the pipeline can match on the
//! failure kind and pick the next deterministic fallback.

/// Failure kinds reported by external collaborators
pub mod collaborator;

pub use collaborator::{CollaboratorError, CollaboratorResult};

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::io;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Input failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Numeric input outside its permitted range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,

    // Resource Management (4000-4999)
    /// Requested resource does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // External Services (5000-5999)
    /// External service returned an error
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// External service could not be reached
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,

    // Configuration (6000-6999)
    /// Configuration value could not be parsed or validated
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,
    /// Required configuration value is absent
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Record store read failed
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
    /// Data serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ValueOutOfRange => "A numeric value is outside the permitted range",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ExternalServiceError => "An external service returned an error",
            Self::ExternalServiceUnavailable => "An external service is unavailable",
            Self::ConfigError => "Configuration error",
            Self::ConfigMissing => "Required configuration is missing",
            Self::InternalError => "An internal error occurred",
            Self::StorageError => "Storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Numeric value outside its permitted range
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// External service error, prefixed with the service name
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// External service unreachable
    pub fn external_unavailable(service: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{} is unavailable", service.into()),
        )
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::SerializationError,
            format!("JSON processing failed: {error}"),
        )
        .with_source(error)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::new(ErrorCode::StorageError, format!("I/O failure: {error}")).with_source(error)
    }
}

#[cfg(feature = "storage-errors")]
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        Self::storage(format!("Database query failed: {error}")).with_source(error)
    }
}

#[cfg(feature = "http-errors")]
impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        let code = if error.is_connect() || error.is_timeout() {
            ErrorCode::ExternalServiceUnavailable
        } else {
            ErrorCode::ExternalServiceError
        };
        Self::new(code, format!("HTTP request failed: {error}")).with_source(error)
    }
}
