use serde::Serialize;

use super::Word;

/// Canonical transcription result: full text plus the chronological word
/// sequence, with all provider timestamps already converted to seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcript {
    #[serde(rename = "transcript")]
    pub full_text: String,
    pub words: Vec<Word>,
    pub audio_duration_sec: f64,
}
