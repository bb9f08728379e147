use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::services::EvaluationMessage;
use crate::domain::{AudioArtifact, Job, JobError};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct SubmitEvaluationResponse {
    pub job_id: String,
    pub status: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Accepts an audio upload, stages it, registers a pending job and enqueues
/// it for the evaluation worker. Replies immediately with the job id.
#[tracing::instrument(skip(state, multipart))]
pub async fn submit_evaluation_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            tracing::warn!("Evaluation request with no file");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No file provided".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read multipart: {}", e),
                }),
            )
                .into_response();
        }
    };

    let filename = match field.file_name() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No file provided".to_string(),
                }),
            )
                .into_response();
        }
    };
    let media_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    tracing::debug!(filename = %filename, media_type = %media_type, "Processing audio upload");

    let extension = std::path::Path::new(&filename)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()));
    let allowed = &state.settings.uploads.allowed_extensions;
    let supported = extension
        .as_deref()
        .is_some_and(|ext| allowed.iter().any(|a| a == ext));
    if !supported {
        tracing::warn!(filename = %filename, "Unsupported file format");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Unsupported file format. Allowed: {}", allowed.join(", ")),
            }),
        )
            .into_response();
    }

    let data = match field.bytes().await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read file bytes");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read file: {}", e),
                }),
            )
                .into_response();
        }
    };

    if data.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Empty file".to_string(),
            }),
        )
            .into_response();
    }
    if data.len() as u64 > state.settings.uploads.max_file_size_bytes {
        tracing::warn!(bytes = data.len(), "Upload exceeds size limit");
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(ErrorResponse {
                error: "File too large".to_string(),
            }),
        )
            .into_response();
    }

    let job = Job::new();
    let job_id = job.id;
    let artifact = AudioArtifact::new(&job_id, filename.clone(), media_type, data.len() as u64);

    if let Err(e) = state
        .artifact_store
        .store(&artifact.storage_path, data)
        .await
    {
        tracing::error!(error = %e, "Failed to stage audio artifact");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to store file: {}", e),
            }),
        )
            .into_response();
    }

    if let Err(e) = state.job_repository.create(&job).await {
        tracing::error!(error = %e, "Failed to create job record");
        if let Err(del_err) = state.artifact_store.delete(&artifact.storage_path).await {
            tracing::warn!(error = %del_err, "Failed to delete staged artifact after create failure");
        }
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to create job: {}", e),
            }),
        )
            .into_response();
    }

    let msg = EvaluationMessage {
        job_id,
        artifact: artifact.clone(),
    };
    // try_send so a saturated queue answers 503 instead of stalling the
    // request until a worker drains a slot.
    if let Err(e) = state.evaluation_sender.try_send(msg) {
        tracing::error!(error = %e, "Failed to enqueue evaluation job");
        if let Err(del_err) = state.artifact_store.delete(&artifact.storage_path).await {
            tracing::warn!(error = %del_err, "Failed to delete staged artifact after enqueue failure");
        }
        let job_error = JobError::new(
            "QueueUnavailable",
            "evaluation queue full or worker unavailable",
        );
        if let Err(fail_err) = state.job_repository.fail(job_id, job_error).await {
            tracing::warn!(error = %fail_err, "Failed to record enqueue failure on job");
        }
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "Evaluation queue full or worker unavailable".to_string(),
            }),
        )
            .into_response();
    }

    tracing::info!(
        job_id = %job_id.as_uuid(),
        filename = %filename,
        "Evaluation job enqueued"
    );

    (
        StatusCode::ACCEPTED,
        Json(SubmitEvaluationResponse {
            job_id: job_id.as_uuid().to_string(),
            status: job.status.as_str().to_string(),
            message: "Processing started".to_string(),
        }),
    )
        .into_response()
}
