mod artifact_store;
mod job_repository;
mod llm_client;
mod repository_error;
mod transcription_provider;

pub use artifact_store::{ArtifactStore, ArtifactStoreError};
pub use job_repository::JobRepository;
pub use llm_client::{LlmClient, LlmClientError};
pub use repository_error::RepositoryError;
pub use transcription_provider::{ProviderHealth, TranscriptionError, TranscriptionProvider};
