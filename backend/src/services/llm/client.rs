//! LLM Client
//!
//! Transport for the completion API. The service only talks to the
//! [`CompletionClient`] trait; [`OpenAIClient`] is the reqwest-backed
//! implementation for OpenAI-compatible providers.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::LlmConfig;
use crate::services::llm::models::{ChatCompletionRequest, ChatCompletionResponse, LLMError, LLMResult};

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Submit one chat completion request and return the decoded response.
    async fn complete(&self, request: &ChatCompletionRequest) -> LLMResult<ChatCompletionResponse>;
}

/// OpenAI-compatible `chat/completions` client.
///
/// Built once at startup and shared across requests. No timeout is set, so
/// reqwest defaults apply.
pub struct OpenAIClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl OpenAIClient {
    pub fn new(api_base: &str, api_key: impl Into<String>) -> LLMResult<Self> {
        let api_base = api_base.trim().trim_end_matches('/');
        if api_base.is_empty() {
            return Err(LLMError::Configuration("api_base cannot be empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| LLMError::Configuration(e.to_string()))?;

        Ok(Self { http, endpoint: format!("{}/chat/completions", api_base), api_key: api_key.into() })
    }

    pub fn from_config(config: &LlmConfig) -> LLMResult<Self> {
        Self::new(&config.api_base, config.api_key.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionClient for OpenAIClient {
    async fn complete(&self, request: &ChatCompletionRequest) -> LLMResult<ChatCompletionResponse> {
        tracing::debug!(
            "POST {} model={} messages={} max_tokens={}",
            self.endpoint,
            request.model,
            request.messages.len(),
            request.max_tokens
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = extract_provider_message(&body);
            tracing::warn!(
                "Completion API returned {}: {}",
                status,
                message.as_deref().unwrap_or("<no provider message>")
            );
            return Err(LLMError::ApiError { status: status.as_u16(), message });
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|e| LLMError::ParseError(e.to_string()))?;

        if let Some(usage) = parsed.usage {
            tracing::debug!(
                "Completion usage: prompt={} completion={} total={}",
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }

        Ok(parsed)
    }
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    error: Option<ProviderErrorDetail>,
}

#[derive(Deserialize)]
struct ProviderErrorDetail {
    message: Option<String>,
}

/// Pull `error.message` out of a provider error body, if it has one.
fn extract_provider_message(body: &str) -> Option<String> {
    serde_json::from_str::<ProviderErrorBody>(body)
        .ok()?
        .error?
        .message
        .filter(|m| !m.trim().is_empty())
}
