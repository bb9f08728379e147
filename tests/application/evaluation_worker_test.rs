use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::{mpsc, Mutex, RwLock};

use speakeval::application::ports::{
    ArtifactStore, ArtifactStoreError, JobRepository, LlmClient, LlmClientError, ProviderHealth,
    TranscriptionError, TranscriptionProvider,
};
use speakeval::application::services::{
    EvaluationMessage, EvaluationWorker, FeedbackGenerator, PacingAnalyzer, PauseAnalyzer,
    PronunciationAnalyzer, FALLBACK_FEEDBACK,
};
use speakeval::domain::{AudioArtifact, Job, JobId, JobStatus, StoragePath, Transcript, Word};
use speakeval::infrastructure::persistence::InMemoryJobRepository;

const TEST_FEEDBACK: &str = "Solid delivery.";

#[derive(Default)]
struct InMemoryArtifactStore {
    files: RwLock<HashMap<String, Bytes>>,
}

impl InMemoryArtifactStore {
    async fn contains(&self, path: &StoragePath) -> bool {
        self.files.read().await.contains_key(path.as_str())
    }
}

#[async_trait::async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn store(&self, path: &StoragePath, data: Bytes) -> Result<u64, ArtifactStoreError> {
        let size = data.len() as u64;
        self.files
            .write()
            .await
            .insert(path.as_str().to_string(), data);
        Ok(size)
    }

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, ArtifactStoreError> {
        self.files
            .read()
            .await
            .get(path.as_str())
            .map(|b| b.to_vec())
            .ok_or_else(|| ArtifactStoreError::NotFound(path.as_str().to_string()))
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), ArtifactStoreError> {
        self.files
            .write()
            .await
            .remove(path.as_str())
            .map(|_| ())
            .ok_or_else(|| ArtifactStoreError::DeleteFailed(path.as_str().to_string()))
    }
}

struct StubTranscriptionProvider;

#[async_trait::async_trait]
impl TranscriptionProvider for StubTranscriptionProvider {
    async fn transcribe(
        &self,
        _audio: &[u8],
        _artifact: &AudioArtifact,
    ) -> Result<Transcript, TranscriptionError> {
        Ok(Transcript {
            full_text: "hello world".to_string(),
            words: vec![
                Word::new("hello", 0.0, 0.4, 0.9),
                Word::new("world", 1.1, 1.5, 0.6),
            ],
            audio_duration_sec: 1.2,
        })
    }

    async fn health_check(&self) -> ProviderHealth {
        ProviderHealth::Healthy
    }
}

struct FailingTranscriptionProvider;

#[async_trait::async_trait]
impl TranscriptionProvider for FailingTranscriptionProvider {
    async fn transcribe(
        &self,
        _audio: &[u8],
        _artifact: &AudioArtifact,
    ) -> Result<Transcript, TranscriptionError> {
        Err(TranscriptionError::Authentication)
    }

    async fn health_check(&self) -> ProviderHealth {
        ProviderHealth::Unauthorized
    }
}

struct StubLlmClient;

#[async_trait::async_trait]
impl LlmClient for StubLlmClient {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmClientError> {
        Ok(TEST_FEEDBACK.to_string())
    }
}

struct FailingLlmClient;

#[async_trait::async_trait]
impl LlmClient for FailingLlmClient {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmClientError> {
        Err(LlmClientError::ApiRequestFailed("boom".to_string()))
    }
}

struct Harness {
    sender: mpsc::Sender<EvaluationMessage>,
    repository: Arc<InMemoryJobRepository>,
    store: Arc<InMemoryArtifactStore>,
}

fn build_worker(
    receiver: mpsc::Receiver<EvaluationMessage>,
    repository: Arc<InMemoryJobRepository>,
    store: Arc<InMemoryArtifactStore>,
    provider: Arc<dyn TranscriptionProvider>,
    llm: Arc<dyn LlmClient>,
) -> EvaluationWorker {
    EvaluationWorker::new(
        Arc::new(Mutex::new(receiver)),
        repository,
        store,
        provider,
        PronunciationAnalyzer::new(0.85),
        PacingAnalyzer::new(90, 150),
        PauseAnalyzer::new(0.5),
        FeedbackGenerator::new(llm),
    )
}

fn spawn_worker(provider: Arc<dyn TranscriptionProvider>, llm: Arc<dyn LlmClient>) -> Harness {
    let (sender, receiver) = mpsc::channel(4);
    let repository = Arc::new(InMemoryJobRepository::new());
    let store = Arc::new(InMemoryArtifactStore::default());

    let worker = build_worker(
        receiver,
        Arc::clone(&repository),
        Arc::clone(&store),
        provider,
        llm,
    );
    tokio::spawn(worker.run());

    Harness {
        sender,
        repository,
        store,
    }
}

async fn enqueue_job(harness: &Harness, stage_artifact: bool) -> (JobId, StoragePath) {
    let job = Job::new();
    harness.repository.create(&job).await.unwrap();

    let artifact = AudioArtifact::new(&job.id, "speech.wav", "audio/wav", 4);
    if stage_artifact {
        harness
            .store
            .store(&artifact.storage_path, Bytes::from_static(b"RIFF"))
            .await
            .unwrap();
    }
    let path = artifact.storage_path.clone();

    harness
        .sender
        .send(EvaluationMessage {
            job_id: job.id,
            artifact,
        })
        .await
        .unwrap();

    (job.id, path)
}

async fn wait_for_terminal(repository: &InMemoryJobRepository, id: JobId) -> Job {
    for _ in 0..200 {
        let job = repository.get_by_id(id).await.unwrap().unwrap();
        if job.status.is_terminal() {
            return job;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("job never reached a terminal state");
}

#[tokio::test]
async fn given_enqueued_job_when_processed_then_succeeds_and_releases_artifact() {
    let harness = spawn_worker(Arc::new(StubTranscriptionProvider), Arc::new(StubLlmClient));

    let (job_id, path) = enqueue_job(&harness, true).await;
    let job = wait_for_terminal(&harness.repository, job_id).await;

    assert_eq!(job.status, JobStatus::Succeeded);
    let report = job.result.unwrap();
    assert_eq!(report.pronunciation.pronunciation_score, 75);
    assert_eq!(report.pacing.pacing_wpm, 100);
    assert_eq!(report.pauses.pause_count, 1);
    assert_eq!(report.text_feedback, TEST_FEEDBACK);
    assert!(job.error.is_none());
    assert!(!harness.store.contains(&path).await);
}

#[tokio::test]
async fn given_provider_failure_when_processed_then_fails_with_mapped_kind() {
    let harness = spawn_worker(
        Arc::new(FailingTranscriptionProvider),
        Arc::new(StubLlmClient),
    );

    let (job_id, path) = enqueue_job(&harness, true).await;
    let job = wait_for_terminal(&harness.repository, job_id).await;

    assert_eq!(job.status, JobStatus::Failed);
    assert!(job.result.is_none());
    let error = job.error.unwrap();
    assert_eq!(error.kind, "Authentication");
    assert!(error.message.contains("authentication"));
    assert!(!harness.store.contains(&path).await);
}

#[tokio::test]
async fn given_feedback_outage_when_processed_then_succeeds_with_fallback_text() {
    let harness = spawn_worker(
        Arc::new(StubTranscriptionProvider),
        Arc::new(FailingLlmClient),
    );

    let (job_id, _path) = enqueue_job(&harness, true).await;
    let job = wait_for_terminal(&harness.repository, job_id).await;

    assert_eq!(job.status, JobStatus::Succeeded);
    assert_eq!(job.result.unwrap().text_feedback, FALLBACK_FEEDBACK);
}

#[tokio::test]
async fn given_missing_artifact_when_processed_then_fails_with_artifact_kind() {
    let harness = spawn_worker(Arc::new(StubTranscriptionProvider), Arc::new(StubLlmClient));

    let (job_id, _path) = enqueue_job(&harness, false).await;
    let job = wait_for_terminal(&harness.repository, job_id).await;

    assert_eq!(job.status, JobStatus::Failed);
    assert_eq!(job.error.unwrap().kind, "ArtifactUnavailable");
}

#[tokio::test]
async fn given_closed_queue_when_draining_then_worker_stops() {
    let (sender, receiver) = mpsc::channel(4);
    let worker = build_worker(
        receiver,
        Arc::new(InMemoryJobRepository::new()),
        Arc::new(InMemoryArtifactStore::default()),
        Arc::new(StubTranscriptionProvider),
        Arc::new(StubLlmClient),
    );
    let handle = tokio::spawn(worker.run());

    drop(sender);

    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("worker did not stop after channel close")
        .unwrap();
}
