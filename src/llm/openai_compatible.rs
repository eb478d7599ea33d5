// ABOUTME: OpenAI-compatible chat completion and embedding client over reqwest
// ABOUTME: Works with the hosted OpenAI API and any server exposing the same endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `OpenAI`-Compatible Provider
//!
//! Non-streaming `chat/completions` plus `embeddings`. Configured from
//! [`LlmSettings`] so the CLI and tests share one source of truth.
//!
//! ## Example
//!
//! ```rust,no_run
//! use hansik_fit::config::LlmSettings;
//! use hansik_fit::errors::AppError;
//! use hansik_fit::llm::{ChatMessage, ChatRequest, LlmProvider, OpenAiCompatibleProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let provider = OpenAiCompatibleProvider::from_settings(&LlmSettings::default())?;
//!     let request = ChatRequest::new(vec![ChatMessage::user("불고기 칼로리")]);
//!     let response = provider.complete(&request).await?;
//!     println!("{}", response.content);
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use super::{ChatMessage, ChatRequest, ChatResponse, EmbeddingProvider, LlmProvider};
use crate::config::LlmSettings;
use crate::errors::{AppError, ErrorCode};

/// Provider identifier used in errors and logs
const PROVIDER_NAME: &str = "openai_compatible";

/// Connection timeout
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Whole-request timeout; collaborators apply their own tighter deadline
const REQUEST_TIMEOUT_SECS: u64 = 120;

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

impl From<&ChatMessage> for OpenAiMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    model: String,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    total_tokens: u32,
}

#[derive(Debug, Serialize)]
struct OpenAiEmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingResponse {
    data: Vec<OpenAiEmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Provider
// ============================================================================

/// Endpoint configuration
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL including the version segment, e.g. `https://api.openai.com/v1`
    pub base_url: String,
    /// Bearer token, omitted from requests when absent
    pub api_key: Option<String>,
    /// Chat model used when a request names none
    pub default_model: String,
    /// Embedding model
    pub embedding_model: String,
}

impl From<&LlmSettings> for OpenAiCompatibleConfig {
    fn from(settings: &LlmSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            default_model: settings.model.clone(),
            embedding_model: settings.embedding_model.clone(),
        }
    }
}

/// Chat and embedding client for an OpenAI-compatible endpoint
pub struct OpenAiCompatibleProvider {
    config: OpenAiCompatibleConfig,
    client: Client,
}

impl OpenAiCompatibleProvider {
    /// Create a provider with explicit configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        info!(
            base_url = %config.base_url,
            model = %config.default_model,
            embedding_model = %config.embedding_model,
            "Initialized OpenAI-compatible provider"
        );
        Ok(Self { config, client })
    }

    /// Create a provider from runtime settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn from_settings(settings: &LlmSettings) -> Result<Self, AppError> {
        Self::new(OpenAiCompatibleConfig::from(settings))
    }

    /// Full URL for an endpoint path
    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'))
    }

    fn add_auth_header(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => request.bearer_auth(key),
            _ => request,
        }
    }

    /// POST a JSON body and return the raw success body
    async fn post_json<T: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<String, AppError> {
        let request = self
            .client
            .post(self.api_url(endpoint))
            .header("Content-Type", "application/json")
            .json(body);

        let response = self.add_auth_header(request).send().await.map_err(|e| {
            error!("Failed to send request to {}: {}", self.config.base_url, e);
            if e.is_connect() || e.is_timeout() {
                AppError::new(
                    ErrorCode::ExternalServiceUnavailable,
                    format!("Cannot reach {}: {e}", self.config.base_url),
                )
            } else {
                AppError::external_service(PROVIDER_NAME, format!("Failed to connect: {e}"))
            }
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!("Failed to read API response: {}", e);
            AppError::external_service(PROVIDER_NAME, format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &text));
        }
        Ok(text)
    }

    /// Map a non-success status and body onto an application error
    fn parse_error_response(status: StatusCode, body: &str) -> AppError {
        let detail = serde_json::from_str::<OpenAiErrorResponse>(body).map_or_else(
            |_| body.chars().take(200).collect::<String>(),
            |parsed| {
                let kind = parsed.error.error_type.unwrap_or_else(|| "unknown".to_owned());
                format!("{kind} - {}", parsed.error.message)
            },
        );

        match status.as_u16() {
            400 => AppError::invalid_input(format!("API validation error: {detail}")),
            401 | 403 => AppError::new(
                ErrorCode::ConfigError,
                format!("API authentication failed: {detail}"),
            ),
            404 => AppError::not_found(format!("Model or endpoint ({detail})")),
            429 | 502..=504 => AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!("API unavailable ({status}): {detail}"),
            ),
            _ => AppError::external_service(PROVIDER_NAME, format!("API error ({status}): {detail}")),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.config.default_model)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model);

        let openai_request = OpenAiRequest {
            model: model.to_owned(),
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
        };

        let body = self.post_json("chat/completions", &openai_request).await?;
        let openai_response: OpenAiResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse API response: {}", e);
            AppError::external_service(PROVIDER_NAME, format!("Failed to parse response: {e}"))
        })?;

        let choice = openai_response.choices.into_iter().next().ok_or_else(|| {
            AppError::external_service(PROVIDER_NAME, "API response contained no choices")
        })?;

        debug!(
            finish_reason = ?choice.finish_reason,
            total_tokens = openai_response.usage.as_ref().map(|u| u.total_tokens),
            "Chat completion finished"
        );

        Ok(ChatResponse {
            content: choice.message.content.unwrap_or_default(),
            model: openai_response.model,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiCompatibleProvider {
    #[instrument(skip(self, text), fields(model = %self.config.embedding_model))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AppError> {
        let request = OpenAiEmbeddingRequest {
            model: &self.config.embedding_model,
            input: text,
        };
        let body = self.post_json("embeddings", &request).await?;
        let parsed: OpenAiEmbeddingResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::external_service(PROVIDER_NAME, format!("Failed to parse embeddings: {e}"))
        })?;
        parsed
            .data
            .into_iter()
            .next()
            .map(|item| item.embedding)
            .filter(|embedding| !embedding.is_empty())
            .ok_or_else(|| AppError::external_service(PROVIDER_NAME, "No embedding returned"))
    }
}
