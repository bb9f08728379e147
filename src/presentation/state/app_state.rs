use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::ports::{ArtifactStore, JobRepository, TranscriptionProvider};
use crate::application::services::EvaluationMessage;
use crate::presentation::config::Settings;

/// Shared handler state. Everything behind an Arc so a clone per request
/// stays cheap.
#[derive(Clone)]
pub struct AppState {
    pub job_repository: Arc<dyn JobRepository>,
    pub artifact_store: Arc<dyn ArtifactStore>,
    pub transcription_provider: Arc<dyn TranscriptionProvider>,
    pub evaluation_sender: mpsc::Sender<EvaluationMessage>,
    pub settings: Settings,
}
