use async_trait::async_trait;

use crate::application::ports::RepositoryError;
use crate::domain::{EvaluationReport, Job, JobError, JobId};

/// Registry of evaluation jobs. Transitions are monotonic: once a job is
/// terminal its record never changes again.
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &Job) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError>;

    async fn mark_running(&self, id: JobId) -> Result<(), RepositoryError>;

    async fn complete(&self, id: JobId, report: EvaluationReport) -> Result<(), RepositoryError>;

    async fn fail(&self, id: JobId, error: JobError) -> Result<(), RepositoryError>;
}
