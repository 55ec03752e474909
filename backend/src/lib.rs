//! ReplyPilot backend
//!
//! Single-endpoint service that turns a marketplace review into a
//! ready-to-post seller reply via an external completion API.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

pub use services::llm::LLMError;
pub use services::{CompletionClient, OpenAIClient, ReplyService};

/// Shared, read-only application state
pub struct AppState {
    pub reply_service: Arc<ReplyService>,
}

impl AppState {
    pub fn new(reply_service: ReplyService) -> Self {
        Self { reply_service: Arc::new(reply_service) }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(handlers::health::root, handlers::reply::generate_reply),
    components(schemas(
        models::ReplyPilotRequest,
        models::ReplyPilotResponse,
        utils::ErrorResponse
    )),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "ReplyPilot", description = "Review reply generation")
    ),
    info(title = "ReplyPilot API", description = "Generate public replies to marketplace reviews")
)]
pub struct ApiDoc;

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/api/replypilot", post(handlers::reply::generate_reply))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
