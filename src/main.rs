use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::{mpsc, Mutex};

use speakeval::application::ports::{
    ArtifactStore, JobRepository, LlmClient, TranscriptionProvider,
};
use speakeval::application::services::{
    EvaluationWorker, FeedbackGenerator, PacingAnalyzer, PauseAnalyzer, PronunciationAnalyzer,
};
use speakeval::infrastructure::llm::GeminiClient;
use speakeval::infrastructure::observability::{init_tracing, TracingConfig};
use speakeval::infrastructure::persistence::InMemoryJobRepository;
use speakeval::infrastructure::storage::LocalArtifactStore;
use speakeval::infrastructure::transcription::{
    AssemblyAiClient, AssemblyAiConfig, HttpTransport, TransportConfig,
};
use speakeval::presentation::{create_router, AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    init_tracing(
        TracingConfig::new(
            settings.server.environment.as_str(),
            settings.server.json_logs,
        ),
        settings.server.port,
    );

    let transport = HttpTransport::new(&TransportConfig::default())?;
    let transcription_provider: Arc<dyn TranscriptionProvider> = Arc::new(AssemblyAiClient::new(
        transport,
        AssemblyAiConfig {
            base_url: settings.transcription.base_url.clone(),
            api_key: settings.transcription.api_key.clone(),
            max_upload_attempts: settings.transcription.max_upload_attempts,
            upload_backoff_base: settings.transcription.upload_backoff_base,
            poll_interval: settings.transcription.poll_interval,
            max_poll_attempts: settings.transcription.max_poll_attempts,
        },
    ));

    let llm_client: Arc<dyn LlmClient> = Arc::new(GeminiClient::new(
        &settings.feedback.base_url,
        &settings.feedback.model,
        &settings.feedback.api_key,
    ));

    let artifact_store: Arc<dyn ArtifactStore> =
        Arc::new(LocalArtifactStore::new(settings.uploads.dir.clone())?);
    let job_repository: Arc<dyn JobRepository> = Arc::new(InMemoryJobRepository::new());

    let (evaluation_sender, receiver) = mpsc::channel(settings.worker.queue_capacity);

    let worker = EvaluationWorker::new(
        Arc::new(Mutex::new(receiver)),
        Arc::clone(&job_repository),
        Arc::clone(&artifact_store),
        Arc::clone(&transcription_provider),
        PronunciationAnalyzer::new(settings.analysis.pronunciation_threshold),
        PacingAnalyzer::new(
            settings.analysis.slow_wpm_threshold,
            settings.analysis.fast_wpm_threshold,
        ),
        PauseAnalyzer::new(settings.analysis.pause_threshold_sec),
        FeedbackGenerator::new(llm_client),
    );
    for _ in 0..settings.worker.count {
        tokio::spawn(worker.clone().run());
    }

    let state = AppState {
        job_repository,
        artifact_store,
        transcription_provider,
        evaluation_sender,
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
