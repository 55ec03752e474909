pub const LIVENESS_MESSAGE: &str = "ReplyPilot backend is running";

/// Liveness probe
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = String, content_type = "text/plain")
    ),
    tag = "Health"
)]
pub async fn root() -> &'static str {
    LIVENESS_MESSAGE
}
