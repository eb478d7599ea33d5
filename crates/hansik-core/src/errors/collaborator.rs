// ABOUTME: Error kinds returned by external collaborators (model, index, stores)
// ABOUTME: Lets the pipeline pattern-match a failure onto the next fallback tier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use thiserror::Error;

use super::{AppError, ErrorCode};

/// Failure reported by an external collaborator call.
///
/// Every variant is recoverable from the pipeline's point of view: the caller
/// degrades to its deterministic fallback instead of aborting the request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollaboratorError {
    /// Collaborator is not configured or not loaded
    #[error("{service} is unavailable")]
    Unavailable {
        /// Collaborator name
        service: &'static str,
    },
    /// Call exceeded its deadline
    #[error("{service} timed out after {elapsed:?}")]
    Timeout {
        /// Collaborator name
        service: &'static str,
        /// Deadline that elapsed
        elapsed: Duration,
    },
    /// Call reached the collaborator but failed
    #[error("{service} failed: {reason}")]
    Failed {
        /// Collaborator name
        service: &'static str,
        /// Failure detail
        reason: String,
    },
    /// Collaborator answered with output that could not be interpreted
    #[error("{service} returned malformed output: {reason}")]
    Malformed {
        /// Collaborator name
        service: &'static str,
        /// What was wrong with the payload
        reason: String,
    },
}

impl CollaboratorError {
    /// Build a `Failed` error from any displayable cause
    pub fn failed(service: &'static str, reason: impl ToString) -> Self {
        Self::Failed {
            service,
            reason: reason.to_string(),
        }
    }

    /// Build a `Malformed` error from any displayable cause
    pub fn malformed(service: &'static str, reason: impl ToString) -> Self {
        Self::Malformed {
            service,
            reason: reason.to_string(),
        }
    }

    /// Name of the collaborator that failed
    #[must_use]
    pub const fn service(&self) -> &'static str {
        match self {
            Self::Unavailable { service }
            | Self::Timeout { service, .. }
            | Self::Failed { service, .. }
            | Self::Malformed { service, .. } => service,
        }
    }

    /// Short machine-readable kind label, used as a structured log field
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => "unavailable",
            Self::Timeout { .. } => "timeout",
            Self::Failed { .. } => "failed",
            Self::Malformed { .. } => "malformed",
        }
    }
}

impl From<CollaboratorError> for AppError {
    fn from(error: CollaboratorError) -> Self {
        let code = match error {
            CollaboratorError::Unavailable { .. } | CollaboratorError::Timeout { .. } => {
                ErrorCode::ExternalServiceUnavailable
            }
            CollaboratorError::Failed { .. } => ErrorCode::ExternalServiceError,
            CollaboratorError::Malformed { .. } => ErrorCode::SerializationError,
        };
        Self::new(code, error.to_string())
    }
}

/// Result alias for collaborator calls
pub type CollaboratorResult<T> = Result<T, CollaboratorError>;
