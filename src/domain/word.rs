use serde::Serialize;

/// One recognized word with provider-reported timing and confidence.
///
/// Timestamps are in seconds. `start <= end` holds for a single word, but
/// adjacent words may overlap: the provider does not guarantee
/// `words[i].end <= words[i + 1].start`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Word {
    #[serde(rename = "word")]
    pub text: String,
    pub start: f64,
    pub end: f64,
    pub confidence: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, start: f64, end: f64, confidence: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            confidence,
        }
    }
}
