use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::ports::ProviderHealth;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            message: "Voice evaluation service is running".to_string(),
        }),
    )
}

/// Probes the transcription provider. Always answers 200; the body carries
/// the provider verdict.
pub async fn transcription_health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let (status, message) = match state.transcription_provider.health_check().await {
        ProviderHealth::Healthy => ("healthy", "Transcription provider is reachable".to_string()),
        ProviderHealth::Unauthorized => ("error", "Invalid API key".to_string()),
        ProviderHealth::RateLimited => ("warning", "Rate limited".to_string()),
        ProviderHealth::Unreachable(detail) => ("error", detail),
    };
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: status.to_string(),
            message,
        }),
    )
}
