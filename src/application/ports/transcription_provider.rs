use async_trait::async_trait;

use crate::domain::{AudioArtifact, Transcript};

/// Remote speech-to-text capability. One call drives the provider's full
/// upload -> submit -> poll lifecycle and returns the normalized transcript.
#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    async fn transcribe(
        &self,
        audio: &[u8],
        artifact: &AudioArtifact,
    ) -> Result<Transcript, TranscriptionError>;

    /// Lightweight reachability probe against the provider API.
    async fn health_check(&self) -> ProviderHealth;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderHealth {
    Healthy,
    Unauthorized,
    RateLimited,
    Unreachable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("transient network failure: {0}")]
    TransientNetwork(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("authentication rejected by provider")]
    Authentication,
    #[error("audio payload too large for provider")]
    PayloadTooLarge,
    #[error("provider rate limit exceeded")]
    RateLimited,
    #[error("unexpected provider status {status}: {detail}")]
    UnexpectedStatus { status: u16, detail: String },
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
    #[error("provider reported transcription failure: {0}")]
    ProviderJobFailed(String),
    #[error("unknown provider status value: {0}")]
    UnknownProviderStatus(String),
    #[error("polling exhausted after {attempts} attempts without a terminal status")]
    PollExhausted { attempts: u32 },
    #[error("upload failed after {attempts} attempts: {source}")]
    UploadExhausted {
        attempts: u32,
        #[source]
        source: Box<TranscriptionError>,
    },
}

impl TranscriptionError {
    /// Stable taxonomy name recorded into a failed job's structured error.
    pub fn kind(&self) -> &'static str {
        match self {
            TranscriptionError::TransientNetwork(_) => "TransientNetwork",
            TranscriptionError::Timeout(_) => "Timeout",
            TranscriptionError::Authentication => "Authentication",
            TranscriptionError::PayloadTooLarge => "PayloadTooLarge",
            TranscriptionError::RateLimited => "RateLimited",
            TranscriptionError::UnexpectedStatus { .. } => "UnexpectedStatus",
            TranscriptionError::MalformedResponse(_) => "MalformedProviderResponse",
            TranscriptionError::ProviderJobFailed(_) => "ProviderJobFailed",
            TranscriptionError::UnknownProviderStatus(_) => "UnknownProviderStatus",
            TranscriptionError::PollExhausted { .. } => "PollExhausted",
            TranscriptionError::UploadExhausted { .. } => "UploadExhausted",
        }
    }
}
