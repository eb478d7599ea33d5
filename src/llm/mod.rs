// ABOUTME: Language model provider abstraction used by the model-backed collaborators
// ABOUTME: Role-based chat messages, completion requests, and an embedding contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Interface
//!
//! The pipeline talks to a hosted model through two narrow contracts:
//!
//! - **`LlmProvider`**: non-streaming chat completion
//! - **`EmbeddingProvider`**: text to dense vector, used by the vector index
//!
//! ## Example: Using a Provider
//!
//! ```rust,no_run
//! use hansik_fit::llm::{ChatMessage, ChatRequest, LlmProvider};
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let request = ChatRequest::new(vec![
//!         ChatMessage::system("You are a Korean cuisine expert."),
//!         ChatMessage::user("김치찌개 레시피"),
//!     ])
//!     .with_temperature(0.7)
//!     .with_max_tokens(1500);
//!     let response = provider.complete(&request).await;
//! }
//! ```

/// Extraction of JSON objects from free-form model output
pub mod json_extract;
mod openai_compatible;
/// Prompt templates loaded at compile time
pub mod prompts;

pub use json_extract::extract_json_object;
pub use openai_compatible::{OpenAiCompatibleConfig, OpenAiCompatibleProvider};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

// ============================================================================
// Message Types
// ============================================================================

/// Role of a message in a chat conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instructions
    System,
    /// User input
    User,
}

impl MessageRole {
    /// Wire name of the role
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

/// A single message in a chat conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Configuration for a chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Model identifier, provider default when absent
    pub model: Option<String>,
    /// Temperature for response randomness (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Create a new chat request with messages
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            model: None,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum tokens
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Response from a chat completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated content
    pub content: String,
    /// Model that answered
    pub model: String,
}

// ============================================================================
// Provider Traits
// ============================================================================

/// Chat completion provider
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short provider identifier used in logs and error messages
    fn name(&self) -> &'static str;

    /// Model used when a request does not name one
    fn default_model(&self) -> &str;

    /// Perform a chat completion
    ///
    /// # Errors
    ///
    /// Returns an error when the request cannot be sent, the endpoint answers
    /// with a non-success status, or the body cannot be parsed
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError>;
}

/// Text embedding provider
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed one text into a dense vector
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint fails or returns no vector
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AppError>;
}
