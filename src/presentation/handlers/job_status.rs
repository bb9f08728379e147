use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{EvaluationReport, JobError, JobId, JobStatus};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct JobStatusResponse {
    pub job_id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<EvaluationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JobError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Reports the current job state. An unknown id maps to PENDING rather
/// than an error, so callers can poll before the registry write lands.
#[tracing::instrument(skip(state))]
pub async fn job_status_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> impl IntoResponse {
    let uuid = match Uuid::parse_str(&job_id) {
        Ok(u) => u,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Invalid job ID: {}", job_id),
                }),
            )
                .into_response();
        }
    };

    match state.job_repository.get_by_id(JobId::from_uuid(uuid)).await {
        Ok(Some(job)) => {
            let message = match job.status {
                JobStatus::Pending => Some("Job is pending".to_string()),
                JobStatus::Running => Some("Job is in progress".to_string()),
                JobStatus::Succeeded | JobStatus::Failed => None,
            };
            let response = JobStatusResponse {
                job_id: job.id.as_uuid().to_string(),
                status: job.status.as_str().to_string(),
                message,
                result: job.result,
                error: job.error,
                created_at: Some(job.created_at.to_rfc3339()),
                updated_at: Some(job.updated_at.to_rfc3339()),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => {
            let response = JobStatusResponse {
                job_id,
                status: JobStatus::Pending.as_str().to_string(),
                message: Some("Job is pending or not found".to_string()),
                result: None,
                error: None,
                created_at: None,
                updated_at: None,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch job status");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to fetch job: {}", e),
                }),
            )
                .into_response()
        }
    }
}
