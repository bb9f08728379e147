use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::{EvaluationReport, Job, JobError, JobId, JobStatus};

/// In-memory job registry. Terminal states are immutable: a late write
/// against a Succeeded or Failed job is dropped, so callers polling a
/// terminal job always read the same payload.
#[derive(Default)]
pub struct InMemoryJobRepository {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    #[instrument(skip(self, job), fields(job_id = %job.id.as_uuid()))]
    async fn create(&self, job: &Job) -> Result<(), RepositoryError> {
        let mut jobs = self.jobs.write().await;
        if jobs.contains_key(&job.id) {
            return Err(RepositoryError::StorageFailed(format!(
                "job {} already exists",
                job.id.as_uuid()
            )));
        }
        jobs.insert(job.id, job.clone());
        Ok(())
    }

    #[instrument(skip(self), fields(job_id = %id.as_uuid()))]
    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        let jobs = self.jobs.read().await;
        Ok(jobs.get(&id).cloned())
    }

    #[instrument(skip(self), fields(job_id = %id.as_uuid()))]
    async fn mark_running(&self, id: JobId) -> Result<(), RepositoryError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(id.as_uuid().to_string()))?;

        if job.status != JobStatus::Pending {
            tracing::warn!(status = %job.status, "Ignoring claim of a non-pending job");
            return Ok(());
        }
        job.status = JobStatus::Running;
        job.updated_at = Utc::now();
        Ok(())
    }

    #[instrument(skip(self, report), fields(job_id = %id.as_uuid()))]
    async fn complete(&self, id: JobId, report: EvaluationReport) -> Result<(), RepositoryError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(id.as_uuid().to_string()))?;

        if job.status.is_terminal() {
            tracing::warn!(status = %job.status, "Ignoring completion of a terminal job");
            return Ok(());
        }
        job.status = JobStatus::Succeeded;
        job.result = Some(report);
        job.updated_at = Utc::now();
        Ok(())
    }

    #[instrument(skip(self, error), fields(job_id = %id.as_uuid()))]
    async fn fail(&self, id: JobId, error: JobError) -> Result<(), RepositoryError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(id.as_uuid().to_string()))?;

        if job.status.is_terminal() {
            tracing::warn!(status = %job.status, "Ignoring failure of a terminal job");
            return Ok(());
        }
        job.status = JobStatus::Failed;
        job.error = Some(error);
        job.updated_at = Utc::now();
        Ok(())
    }
}
