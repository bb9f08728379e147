use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::Instrument;

use crate::application::ports::{
    ArtifactStore, ArtifactStoreError, JobRepository, RepositoryError, TranscriptionError,
    TranscriptionProvider,
};
use crate::application::services::FeedbackGenerator;
use crate::application::services::{PacingAnalyzer, PauseAnalyzer, PronunciationAnalyzer};
use crate::domain::{AudioArtifact, EvaluationReport, JobError, JobId};

pub struct EvaluationMessage {
    pub job_id: JobId,
    pub artifact: AudioArtifact,
}

/// Out-of-band executor for one evaluation at a time. Several workers may
/// share the receiver; the queue hands each message to exactly one of them.
#[derive(Clone)]
pub struct EvaluationWorker {
    receiver: Arc<Mutex<mpsc::Receiver<EvaluationMessage>>>,
    job_repository: Arc<dyn JobRepository>,
    artifact_store: Arc<dyn ArtifactStore>,
    transcription_provider: Arc<dyn TranscriptionProvider>,
    pronunciation: PronunciationAnalyzer,
    pacing: PacingAnalyzer,
    pauses: PauseAnalyzer,
    feedback: FeedbackGenerator,
}

impl EvaluationWorker {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        receiver: Arc<Mutex<mpsc::Receiver<EvaluationMessage>>>,
        job_repository: Arc<dyn JobRepository>,
        artifact_store: Arc<dyn ArtifactStore>,
        transcription_provider: Arc<dyn TranscriptionProvider>,
        pronunciation: PronunciationAnalyzer,
        pacing: PacingAnalyzer,
        pauses: PauseAnalyzer,
        feedback: FeedbackGenerator,
    ) -> Self {
        Self {
            receiver,
            job_repository,
            artifact_store,
            transcription_provider,
            pronunciation,
            pacing,
            pauses,
            feedback,
        }
    }

    pub async fn run(self) {
        tracing::info!("Evaluation worker started");
        loop {
            // Hold the lock only while waiting for a claim, never while
            // processing, so other workers keep draining the queue.
            let msg = {
                let mut receiver = self.receiver.lock().await;
                receiver.recv().await
            };
            let Some(msg) = msg else {
                break;
            };

            let span = tracing::info_span!(
                "evaluation_job",
                job_id = %msg.job_id.as_uuid(),
                filename = %msg.artifact.filename,
            );
            if let Err(e) = self.process_job(msg).instrument(span).await {
                tracing::error!(error = %e, "Evaluation job failed");
            }
        }
        tracing::info!("Evaluation worker stopped: channel closed");
    }

    async fn process_job(&self, msg: EvaluationMessage) -> Result<(), EvaluationError> {
        let job_id = msg.job_id;

        let outcome = match self.job_repository.mark_running(job_id).await {
            Ok(()) => self.run_pipeline(&msg).await,
            Err(e) => Err(EvaluationError::Repository(e)),
        };

        // The artifact is owned by this job and released on every exit path.
        if let Err(e) = self.artifact_store.delete(&msg.artifact.storage_path).await {
            tracing::warn!(
                error = %e,
                path = %msg.artifact.storage_path,
                "Failed to delete audio artifact after processing"
            );
        }

        match outcome {
            Ok(report) => {
                self.job_repository
                    .complete(job_id, report)
                    .await
                    .map_err(EvaluationError::Repository)?;
                tracing::info!("Evaluation completed");
                Ok(())
            }
            Err(e) => {
                self.job_repository
                    .fail(job_id, e.to_job_error())
                    .await
                    .map_err(EvaluationError::Repository)?;
                Err(e)
            }
        }
    }

    async fn run_pipeline(
        &self,
        msg: &EvaluationMessage,
    ) -> Result<EvaluationReport, EvaluationError> {
        let audio = self
            .artifact_store
            .fetch(&msg.artifact.storage_path)
            .await
            .map_err(EvaluationError::Artifact)?;

        let transcript = self
            .transcription_provider
            .transcribe(&audio, &msg.artifact)
            .await
            .map_err(EvaluationError::Transcription)?;

        let pronunciation = self.pronunciation.analyze(&transcript.words);
        let pacing = self
            .pacing
            .analyze(&transcript.words, transcript.audio_duration_sec);
        let pauses = self.pauses.analyze(&transcript.words);

        let text_feedback = self.feedback.generate(&pronunciation, &pacing, &pauses).await;

        Ok(EvaluationReport {
            transcription: transcript,
            pronunciation,
            pacing,
            pauses,
            text_feedback,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("artifact store: {0}")]
    Artifact(ArtifactStoreError),
    #[error("transcription: {0}")]
    Transcription(TranscriptionError),
    #[error("repository: {0}")]
    Repository(RepositoryError),
}

impl EvaluationError {
    /// Structured error recorded into the job's terminal Failed state.
    pub fn to_job_error(&self) -> JobError {
        match self {
            EvaluationError::Transcription(e) => {
                let base = JobError::new(e.kind(), e.to_string());
                match e {
                    TranscriptionError::UploadExhausted { source, .. } => {
                        base.with_detail(source.to_string())
                    }
                    TranscriptionError::ProviderJobFailed(detail) => {
                        base.with_detail(detail.clone())
                    }
                    TranscriptionError::UnexpectedStatus { detail, .. } => {
                        base.with_detail(detail.clone())
                    }
                    _ => base,
                }
            }
            EvaluationError::Artifact(e) => JobError::new("ArtifactUnavailable", e.to_string()),
            EvaluationError::Repository(e) => JobError::new("RegistryFailure", e.to_string()),
        }
    }
}
