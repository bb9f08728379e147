use serde::Serialize;

use super::Transcript;

/// A word whose recognition confidence fell below the pronunciation
/// threshold, reported in original (chronological) order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MispronouncedWord {
    pub word: String,
    pub start: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PronunciationReport {
    pub pronunciation_score: u32,
    pub mispronounced_words: Vec<MispronouncedWord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PacingReport {
    pub pacing_wpm: u32,
    pub pacing_feedback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PauseReport {
    pub pause_count: usize,
    pub total_pause_time_sec: f64,
    pub pause_feedback: String,
}

/// Final evaluation payload embedded in a succeeded job. Immutable once
/// produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub transcription: Transcript,
    pub pronunciation: PronunciationReport,
    pub pacing: PacingReport,
    pub pauses: PauseReport,
    pub text_feedback: String,
}
