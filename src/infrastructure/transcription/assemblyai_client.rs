use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{ProviderHealth, TranscriptionError, TranscriptionProvider};
use crate::domain::{AudioArtifact, Transcript, Word};
use crate::infrastructure::transcription::transport::{HttpTransport, TransportError};

/// Canonical extension to media type mapping. Takes precedence over the
/// media type declared at submission, which is only a caller-supplied guess.
const MEDIA_TYPE_OVERRIDES: [(&str, &str); 5] = [
    (".mp3", "audio/mpeg"),
    (".wav", "audio/wav"),
    (".flac", "audio/flac"),
    (".ogg", "audio/ogg"),
    (".m4a", "audio/mp4"),
];

#[derive(Debug, Clone)]
pub struct AssemblyAiConfig {
    pub base_url: String,
    pub api_key: String,
    pub max_upload_attempts: u32,
    pub upload_backoff_base: Duration,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
}

/// AssemblyAI adapter driving the provider's upload, submit and poll
/// lifecycle for one artifact per call.
pub struct AssemblyAiClient {
    transport: HttpTransport,
    config: AssemblyAiConfig,
}

impl AssemblyAiClient {
    pub fn new(transport: HttpTransport, config: AssemblyAiConfig) -> Self {
        Self { transport, config }
    }

    fn upload_url(&self) -> String {
        format!("{}/upload", self.config.base_url.trim_end_matches('/'))
    }

    fn transcript_url(&self) -> String {
        format!("{}/transcript", self.config.base_url.trim_end_matches('/'))
    }

    /// Uploads the audio bytes, retrying transient network failures with
    /// exponential backoff. Every other failure kind is final on the spot.
    async fn upload_with_retry(
        &self,
        audio: &[u8],
        artifact: &AudioArtifact,
    ) -> Result<String, TranscriptionError> {
        let max_attempts = self.config.max_upload_attempts.max(1);
        let mut attempt = 0u32;
        loop {
            match self.upload(audio, artifact).await {
                Ok(url) => return Ok(url),
                Err(TranscriptionError::TransientNetwork(msg)) => {
                    if attempt + 1 >= max_attempts {
                        return Err(TranscriptionError::UploadExhausted {
                            attempts: max_attempts,
                            source: Box::new(TranscriptionError::TransientNetwork(msg)),
                        });
                    }
                    let wait = upload_backoff(self.config.upload_backoff_base, attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        wait_ms = wait.as_millis() as u64,
                        error = %msg,
                        "Upload attempt failed, retrying"
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn upload(
        &self,
        audio: &[u8],
        artifact: &AudioArtifact,
    ) -> Result<String, TranscriptionError> {
        let media_type = effective_media_type(artifact);
        if media_type != artifact.media_type {
            tracing::debug!(
                declared = %artifact.media_type,
                effective = %media_type,
                "Overriding declared media type by extension"
            );
        }

        tracing::debug!(
            filename = %artifact.filename,
            size_bytes = audio.len() as u64,
            "Uploading audio to transcription provider"
        );

        let part = multipart::Part::bytes(audio.to_vec())
            .file_name(artifact.filename.clone())
            .mime_str(&media_type)
            .map_err(|e| {
                TranscriptionError::MalformedResponse(format!("request construction: {}", e))
            })?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .transport
            .post_multipart(&self.upload_url(), &self.config.api_key, form)
            .await
            .map_err(map_transport_error)?;

        let parsed: UploadResponse = response.json().map_err(|e| {
            TranscriptionError::MalformedResponse(format!("upload response: {}", e))
        })?;
        parsed.upload_url.ok_or_else(|| {
            TranscriptionError::MalformedResponse("upload response missing upload_url".to_string())
        })
    }

    async fn submit(&self, upload_url: &str) -> Result<String, TranscriptionError> {
        let body = serde_json::json!({ "audio_url": upload_url });
        let response = self
            .transport
            .post_json(&self.transcript_url(), &self.config.api_key, &body)
            .await
            .map_err(map_transport_error)?;

        let parsed: SubmitResponse = response.json().map_err(|e| {
            TranscriptionError::MalformedResponse(format!("submit response: {}", e))
        })?;
        parsed.id.ok_or_else(|| {
            TranscriptionError::MalformedResponse(
                "submit response missing transcript id".to_string(),
            )
        })
    }

    /// Fixed-interval poll loop bounded by the attempt budget. Queued and
    /// processing are both non-terminal and treated identically.
    async fn poll(&self, transcript_id: &str) -> Result<TranscriptEnvelope, TranscriptionError> {
        let url = format!("{}/{}", self.transcript_url(), transcript_id);
        let max_attempts = self.config.max_poll_attempts.max(1);

        for attempt in 0..max_attempts {
            let response = self
                .transport
                .get(&url, &self.config.api_key)
                .await
                .map_err(map_transport_error)?;

            let envelope: TranscriptEnvelope = response.json().map_err(|e| {
                TranscriptionError::MalformedResponse(format!("transcript response: {}", e))
            })?;

            match envelope.status.as_deref() {
                Some("completed") => return Ok(envelope),
                Some("error") => {
                    let detail = envelope
                        .error
                        .unwrap_or_else(|| "unknown transcription error".to_string());
                    return Err(TranscriptionError::ProviderJobFailed(detail));
                }
                Some("queued") | Some("processing") => {
                    if attempt + 1 < max_attempts {
                        tokio::time::sleep(self.config.poll_interval).await;
                    }
                }
                other => {
                    return Err(TranscriptionError::UnknownProviderStatus(
                        other.unwrap_or("<missing>").to_string(),
                    ));
                }
            }
        }

        Err(TranscriptionError::PollExhausted {
            attempts: max_attempts,
        })
    }
}

#[async_trait]
impl TranscriptionProvider for AssemblyAiClient {
    async fn transcribe(
        &self,
        audio: &[u8],
        artifact: &AudioArtifact,
    ) -> Result<Transcript, TranscriptionError> {
        let upload_url = self.upload_with_retry(audio, artifact).await?;
        let transcript_id = self.submit(&upload_url).await?;
        tracing::info!(transcript_id = %transcript_id, "Transcription job submitted");

        let envelope = self.poll(&transcript_id).await?;
        let transcript = parse_transcript(envelope);
        tracing::info!(
            words = transcript.words.len(),
            duration_sec = transcript.audio_duration_sec,
            "Transcription completed"
        );
        Ok(transcript)
    }

    async fn health_check(&self) -> ProviderHealth {
        // The transcript listing endpoint answers 200 when authorized and
        // 404 on some plans; both prove the provider is reachable.
        match self
            .transport
            .get(&self.transcript_url(), &self.config.api_key)
            .await
        {
            Ok(_) => ProviderHealth::Healthy,
            Err(TransportError::Status { status: 404, .. }) => ProviderHealth::Healthy,
            Err(TransportError::Status { status: 401, .. }) => ProviderHealth::Unauthorized,
            Err(TransportError::Status { status: 429, .. }) => ProviderHealth::RateLimited,
            Err(TransportError::Status { status, .. }) => {
                ProviderHealth::Unreachable(format!("unexpected status {}", status))
            }
            Err(e) => ProviderHealth::Unreachable(e.to_string()),
        }
    }
}

/// Wait before upload retry number `attempt + 1`, doubling from the base.
pub fn upload_backoff(base: Duration, attempt: u32) -> Duration {
    base * 2u32.saturating_pow(attempt)
}

fn effective_media_type(artifact: &AudioArtifact) -> String {
    if let Some(extension) = artifact.extension() {
        for (known, media_type) in MEDIA_TYPE_OVERRIDES {
            if known == extension {
                return media_type.to_string();
            }
        }
    }
    artifact.media_type.clone()
}

fn map_transport_error(e: TransportError) -> TranscriptionError {
    match e {
        TransportError::Network(msg) => TranscriptionError::TransientNetwork(msg),
        TransportError::Timeout(msg) => TranscriptionError::Timeout(msg),
        TransportError::Status { status: 401, .. } => TranscriptionError::Authentication,
        TransportError::Status { status: 413, .. } => TranscriptionError::PayloadTooLarge,
        TransportError::Status { status: 429, .. } => TranscriptionError::RateLimited,
        TransportError::Status { status, body } => TranscriptionError::UnexpectedStatus {
            status,
            detail: body,
        },
        TransportError::Construction(msg) => {
            TranscriptionError::MalformedResponse(format!("request construction: {}", msg))
        }
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    upload_url: Option<String>,
}

#[derive(Deserialize)]
struct SubmitResponse {
    id: Option<String>,
}

/// Raw provider transcript payload, timestamps in milliseconds.
#[derive(Debug, Deserialize)]
pub struct TranscriptEnvelope {
    pub status: Option<String>,
    pub text: Option<String>,
    #[serde(default)]
    pub words: Vec<WireWord>,
    pub audio_duration: Option<f64>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireWord {
    pub text: String,
    pub start: f64,
    pub end: f64,
    pub confidence: f64,
}

/// Converts the provider payload into the canonical transcript shape,
/// milliseconds to seconds. A missing duration maps to zero, not an error.
pub fn parse_transcript(envelope: TranscriptEnvelope) -> Transcript {
    let words = envelope
        .words
        .into_iter()
        .map(|w| Word::new(w.text, w.start / 1000.0, w.end / 1000.0, w.confidence))
        .collect();

    Transcript {
        full_text: envelope.text.unwrap_or_default(),
        words,
        audio_duration_sec: envelope.audio_duration.unwrap_or(0.0) / 1000.0,
    }
}
