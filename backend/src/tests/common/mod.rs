// Common test utilities and helpers

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use crate::services::llm::{
    ChatCompletionRequest, ChatCompletionResponse, Choice, ChoiceMessage, CompletionClient,
    CompletionSettings, LLMError, LLMResult, ReplyService,
};
use crate::{AppState, build_router};

/// What the mock client answers with on every call
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Reply(ChatCompletionResponse),
    ProviderError { status: u16, message: Option<String> },
    Malformed(String),
}

/// In-process `CompletionClient` that records every request it receives
pub struct MockCompletionClient {
    outcome: MockOutcome,
    calls: Mutex<Vec<ChatCompletionRequest>>,
}

impl MockCompletionClient {
    pub fn new(outcome: MockOutcome) -> Arc<Self> {
        Arc::new(Self { outcome, calls: Mutex::new(Vec::new()) })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::new(MockOutcome::Reply(completion_with(Some(text))))
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<ChatCompletionRequest> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, request: &ChatCompletionRequest) -> LLMResult<ChatCompletionResponse> {
        self.calls.lock().unwrap().push(request.clone());
        match &self.outcome {
            MockOutcome::Reply(response) => Ok(response.clone()),
            MockOutcome::ProviderError { status, message } => {
                Err(LLMError::ApiError { status: *status, message: message.clone() })
            },
            MockOutcome::Malformed(reason) => Err(LLMError::ParseError(reason.clone())),
        }
    }
}

/// Completion with a single choice whose content is `content`
pub fn completion_with(content: Option<&str>) -> ChatCompletionResponse {
    ChatCompletionResponse {
        choices: vec![Choice {
            index: 0,
            message: Some(ChoiceMessage {
                role: Some("assistant".to_string()),
                content: content.map(str::to_string),
            }),
            finish_reason: Some("stop".to_string()),
        }],
        model: Some("gpt-4o-mini".to_string()),
        usage: None,
    }
}

pub fn test_settings() -> CompletionSettings {
    CompletionSettings { model: "gpt-4o-mini".to_string(), temperature: 0.7, max_tokens: 300 }
}

pub fn create_test_reply_service(client: Arc<MockCompletionClient>) -> ReplyService {
    ReplyService::new(client, test_settings())
}

pub fn create_test_app(client: Arc<MockCompletionClient>) -> Router {
    build_router(Arc::new(AppState::new(create_test_reply_service(client))))
}

/// POST a raw JSON body to `/api/replypilot` and decode the JSON response
pub async fn post_reply(app: Router, body: impl Into<String>) -> (StatusCode, serde_json::Value) {
    post_reply_as(app, Some("application/json"), body).await
}

/// Same as [`post_reply`] with an explicit (or absent) `Content-Type`
pub async fn post_reply_as(
    app: Router,
    content_type: Option<&str>,
    body: impl Into<String>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method("POST").uri("/api/replypilot");
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    let request = builder.body(Body::from(body.into())).expect("Failed to build request");

    let response = app.oneshot(request).await.expect("Router failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let json = serde_json::from_slice(&bytes).expect("Response body is not JSON");
    (status, json)
}
