// ABOUTME: Configuration module root
// ABOUTME: Re-exports the environment-driven runtime configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment-based configuration
pub mod environment;

pub use environment::{
    CollaboratorTimeout, ConfigError, DataSourcesConfig, LlmSettings, ResolutionConfig,
    ServerConfig, DEFAULT_COLLABORATOR_TIMEOUT_SECS,
};
