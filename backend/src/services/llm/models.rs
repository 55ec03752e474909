//! LLM Data Models
//!
//! Request/response shapes of the OpenAI-compatible `chat/completions` API
//! and the error type shared by the LLM layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum LLMError {
    #[error("LLM API error (status {status}): {}", .message.as_deref().unwrap_or("no error message"))]
    ApiError { status: u16, message: Option<String> },

    #[error("LLM request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to parse LLM response: {0}")]
    ParseError(String),

    #[error("LLM client configuration error: {0}")]
    Configuration(String),
}

impl LLMError {
    /// Message reported by the provider itself, if it sent one.
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            Self::ApiError { message: Some(message), .. } if !message.trim().is_empty() => {
                Some(message.as_str())
            },
            _ => None,
        }
    }

    /// Best-effort human readable detail:
    /// provider message → own error message → "Unknown error".
    pub fn details(&self) -> String {
        if let Some(message) = self.provider_message() {
            return message.to_string();
        }
        let message = self.to_string();
        if message.trim().is_empty() { "Unknown error".to_string() } else { message }
    }
}

pub type LLMResult<T> = Result<T, LLMError>;

// ============================================================================
// Chat Completion Request
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: ChatRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

// ============================================================================
// Chat Completion Response
// ============================================================================

/// `choices` is required: a body without it is treated as malformed,
/// while an empty list is a valid (empty) completion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

impl ChatCompletionResponse {
    /// Text of the first choice's message, untrimmed.
    pub fn first_message_text(&self) -> Option<&str> {
        self.choices.first()?.message.as_ref()?.content.as_deref()
    }
}
