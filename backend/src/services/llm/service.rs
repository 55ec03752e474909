//! Reply Service - composes prompts and dispatches them to the completion API

use std::sync::Arc;

use crate::config::LlmConfig;
use crate::services::llm::client::{CompletionClient, OpenAIClient};
use crate::services::llm::models::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, LLMResult,
};
use crate::services::llm::scenarios::review_reply::{FALLBACK_REPLY, PromptPair, ReviewRequest};

/// Fixed sampling parameters sent with every request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl From<&LlmConfig> for CompletionSettings {
    fn from(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyResult {
    pub reply: String,
    /// True when the completion had no usable text and the canned reply was used
    pub used_fallback: bool,
}

pub struct ReplyService {
    client: Arc<dyn CompletionClient>,
    settings: CompletionSettings,
}

impl ReplyService {
    pub fn new(client: Arc<dyn CompletionClient>, settings: CompletionSettings) -> Self {
        Self { client, settings }
    }

    /// Build the service with an [`OpenAIClient`] for the configured provider.
    pub fn from_config(config: &LlmConfig) -> LLMResult<Self> {
        let client = OpenAIClient::from_config(config)?;
        tracing::info!("Completion client ready: {} (model {})", client.endpoint(), config.model);
        Ok(Self::new(Arc::new(client), CompletionSettings::from(config)))
    }

    pub fn build_request(&self, prompts: &PromptPair) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage::system(prompts.system_prompt.clone()),
                ChatMessage::user(prompts.user_prompt.clone()),
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        }
    }

    /// Send the prompt pair and extract the reply text.
    ///
    /// Call failures propagate; only a successful call with no usable text
    /// yields the fallback reply.
    pub async fn dispatch(&self, prompts: &PromptPair) -> LLMResult<ReplyResult> {
        let request = self.build_request(prompts);
        let response = self.client.complete(&request).await?;
        Ok(extract_reply_text(&response))
    }

    pub async fn generate_reply(&self, req: &ReviewRequest) -> LLMResult<ReplyResult> {
        tracing::info!(
            "Generating reply: marketplace={}, rating={}, language={}, review_len={}",
            req.marketplace,
            req.rating,
            req.language,
            req.review_text.chars().count()
        );

        let prompts = req.build_prompts();
        let t0 = std::time::Instant::now();
        let result = self.dispatch(&prompts).await;

        match &result {
            Ok(r) if r.used_fallback => tracing::warn!(
                "Completion returned no usable text after {}ms, using fallback reply",
                t0.elapsed().as_millis()
            ),
            Ok(r) => tracing::info!(
                "Reply generated in {}ms ({} chars)",
                t0.elapsed().as_millis(),
                r.reply.chars().count()
            ),
            Err(e) => tracing::error!("Completion call failed after {}ms: {}", t0.elapsed().as_millis(), e.details()),
        }

        result
    }
}

/// First choice's message text, trimmed, or the fallback reply.
pub fn extract_reply_text(response: &ChatCompletionResponse) -> ReplyResult {
    match response.first_message_text().map(str::trim).filter(|text| !text.is_empty()) {
        Some(text) => ReplyResult { reply: text.to_string(), used_fallback: false },
        None => ReplyResult { reply: FALLBACK_REPLY.to_string(), used_fallback: true },
    }
}
