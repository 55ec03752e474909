//! ReplyPilot Handler - generates a public reply for a customer review

use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State};
use tracing::Instrument;

use crate::AppState;
use crate::models::{ReplyPilotRequest, ReplyPilotResponse};
use crate::utils::{ApiError, ApiResult, ErrorResponse};

/// POST /api/replypilot
#[utoipa::path(
    post,
    path = "/api/replypilot",
    request_body = ReplyPilotRequest,
    responses(
        (status = 200, description = "Generated reply", body = ReplyPilotResponse),
        (status = 400, description = "Missing reviewText or unreadable body", body = ErrorResponse),
        (status = 500, description = "Completion call failed", body = ErrorResponse),
    ),
    tag = "ReplyPilot"
)]
pub async fn generate_reply(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<ReplyPilotResponse>> {
    // Decoded regardless of Content-Type; oversized bodies are rejected by `Bytes` itself.
    let payload: ReplyPilotRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::invalid_body(e.to_string()))?;
    let review = payload.into_review_request()?;

    let request_id = uuid::Uuid::new_v4().simple().to_string();
    let span = tracing::info_span!("replypilot", request_id = %request_id);

    let result = state.reply_service.generate_reply(&review).instrument(span).await?;
    Ok(Json(ReplyPilotResponse { reply: result.reply }))
}
