// ABOUTME: Environment configuration for data sources, resolution tuning, and the language model
// ABOUTME: Loads .env via dotenvy, parses typed values, and validates ranges before use
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use hansik_core::constants::{nutrition, resolution};
use hansik_core::errors::AppError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Default OpenAI-compatible endpoint
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
/// Default chat model
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
/// Default embedding model
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
/// Default per-call collaborator deadline (seconds)
pub const DEFAULT_COLLABORATOR_TIMEOUT_SECS: u64 = 20;

/// Configuration load or validation failure
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Variable present but not parseable
    #[error("{key}={value:?} is not valid: {reason}")]
    InvalidValue {
        /// Environment variable name
        key: &'static str,
        /// Raw value
        value: String,
        /// Parser message
        reason: String,
    },
    /// Parsed value outside its allowed range
    #[error("{key} out of range: {reason}")]
    OutOfRange {
        /// Environment variable name
        key: &'static str,
        /// Allowed range description
        reason: String,
    },
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::config(error.to_string())
    }
}

/// Where the catalogs and indexes live; absent entries disable that source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSourcesConfig {
    /// JSON recipe catalog file
    pub recipes_path: Option<PathBuf>,
    /// JSON flat vector index file
    pub vector_index_path: Option<PathBuf>,
    /// `SQLite` nutrition database URL
    pub nutrition_db_url: Option<String>,
}

/// Recipe and nutrition resolution tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolutionConfig {
    /// Minimum embedding similarity, in (0, 1]
    pub similarity_floor: f64,
    /// Neighbors requested from the embedding index
    pub vector_top_k: usize,
    /// Candidates requested from the nutrition similarity search
    pub similar_nutrition_limit: usize,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            similarity_floor: resolution::SIMILARITY_FLOOR,
            vector_top_k: resolution::VECTOR_TOP_K,
            similar_nutrition_limit: nutrition::SIMILAR_LIMIT,
        }
    }
}

/// OpenAI-compatible language model endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// API base URL
    pub base_url: String,
    /// Chat model
    pub model: String,
    /// Embedding model
    pub embedding_model: String,
    /// Bearer token; the model collaborators are disabled without one
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Use the model to write the final response instead of the template
    pub enable_narration: bool,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LLM_BASE_URL.to_owned(),
            model: DEFAULT_LLM_MODEL.to_owned(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_owned(),
            api_key: None,
            enable_narration: false,
        }
    }
}

impl LlmSettings {
    /// Whether a key is configured
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Data files and databases
    pub data: DataSourcesConfig,
    /// Resolver tuning
    pub resolution: ResolutionConfig,
    /// Per-call deadline for every external collaborator
    pub collaborator_timeout: CollaboratorTimeout,
    /// Language model endpoint
    pub llm: LlmSettings,
}

/// Collaborator deadline in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaboratorTimeout(pub u64);

impl Default for CollaboratorTimeout {
    fn default() -> Self {
        Self(DEFAULT_COLLABORATOR_TIMEOUT_SECS)
    }
}

impl CollaboratorTimeout {
    /// As a `Duration`
    #[must_use]
    pub const fn as_duration(self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl ServerConfig {
    /// Load configuration from `.env` and environment variables
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable does not parse or fails validation
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file loaded: {e}");
        }

        let config = Self {
            data: DataSourcesConfig {
                recipes_path: env_path("HANSIK_RECIPES_PATH"),
                vector_index_path: env_path("HANSIK_VECTOR_INDEX_PATH"),
                nutrition_db_url: env_string("HANSIK_NUTRITION_DB_URL"),
            },
            resolution: ResolutionConfig {
                similarity_floor: env_parse_or(
                    "HANSIK_SIMILARITY_FLOOR",
                    resolution::SIMILARITY_FLOOR,
                )?,
                vector_top_k: env_parse_or("HANSIK_VECTOR_TOP_K", resolution::VECTOR_TOP_K)?,
                similar_nutrition_limit: env_parse_or(
                    "HANSIK_SIMILAR_NUTRITION_LIMIT",
                    nutrition::SIMILAR_LIMIT,
                )?,
            },
            collaborator_timeout: CollaboratorTimeout(env_parse_or(
                "HANSIK_COLLABORATOR_TIMEOUT_SECS",
                DEFAULT_COLLABORATOR_TIMEOUT_SECS,
            )?),
            llm: LlmSettings {
                base_url: env_string("LLM_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_owned()),
                model: env_string("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_owned()),
                embedding_model: env_string("EMBEDDING_MODEL")
                    .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_owned()),
                api_key: env_string("LLM_API_KEY").or_else(|| env_string("OPENAI_API_KEY")),
                enable_narration: env_parse_or("HANSIK_ENABLE_NARRATION", false)?,
            },
        };

        config.validate()?;
        info!(
            recipes = config.data.recipes_path.is_some(),
            vector_index = config.data.vector_index_path.is_some(),
            nutrition_db = config.data.nutrition_db_url.is_some(),
            llm = config.llm.is_configured(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] for the first offending value
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floor = self.resolution.similarity_floor;
        if !(floor > 0.0 && floor <= 1.0) {
            return Err(ConfigError::OutOfRange {
                key: "HANSIK_SIMILARITY_FLOOR",
                reason: format!("{floor} is not in (0, 1]"),
            });
        }
        if self.resolution.vector_top_k == 0 {
            return Err(ConfigError::OutOfRange {
                key: "HANSIK_VECTOR_TOP_K",
                reason: "must be at least 1".to_owned(),
            });
        }
        if self.resolution.similar_nutrition_limit == 0 {
            return Err(ConfigError::OutOfRange {
                key: "HANSIK_SIMILAR_NUTRITION_LIMIT",
                reason: "must be at least 1".to_owned(),
            });
        }
        if self.collaborator_timeout.0 == 0 {
            return Err(ConfigError::OutOfRange {
                key: "HANSIK_COLLABORATOR_TIMEOUT_SECS",
                reason: "must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

/// Non-empty trimmed variable value
fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn env_path(key: &str) -> Option<PathBuf> {
    env_string(key).map(PathBuf::from)
}

/// Parse a variable, falling back to `default` when unset or blank
fn env_parse_or<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    env_string(key).map_or(Ok(default), |value| {
        value
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key,
                reason: e.to_string(),
                value,
            })
    })
}
