use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{EvaluationReport, JobId, JobStatus};

/// One end-to-end unit of pipeline work. Owned by the job registry and
/// mutated only by the single worker that claimed it.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub status: JobStatus,
    pub result: Option<EvaluationReport>,
    pub error: Option<JobError>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            status: JobStatus::Pending,
            result: None,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for Job {
    fn default() -> Self {
        Self::new()
    }
}

/// Structured failure recorded in a failed job: the error-taxonomy kind,
/// the human-readable message, and the full diagnostic rendering of the
/// underlying error chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobError {
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl JobError {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
