mod assemblyai_client;
mod transport;

pub use assemblyai_client::{
    parse_transcript, upload_backoff, AssemblyAiClient, AssemblyAiConfig, TranscriptEnvelope,
    WireWord,
};
pub use transport::{HttpResponse, HttpTransport, TransportConfig, TransportError};
