use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    health_handler, job_status_handler, submit_evaluation_handler, transcription_health_handler,
};
use crate::presentation::state::AppState;

// Slack above the upload cap so oversized bodies reach the handler's own
// size check instead of axum's default rejection.
const BODY_LIMIT_SLACK: usize = 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = state.settings.uploads.max_file_size_bytes as usize + BODY_LIMIT_SLACK;

    Router::new()
        .route("/health", get(health_handler))
        .route("/health/transcription", get(transcription_health_handler))
        .route("/api/v1/evaluations", post(submit_evaluation_handler))
        .route("/api/v1/jobs/{job_id}", get(job_status_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
