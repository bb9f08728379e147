use crate::domain::{MispronouncedWord, PronunciationReport, Word};

/// Scores pronunciation from the provider's per-word confidence values.
#[derive(Debug, Clone)]
pub struct PronunciationAnalyzer {
    threshold: f64,
}

impl PronunciationAnalyzer {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Average confidence scaled to 0-100, plus every word whose confidence
    /// falls strictly below the threshold. Empty input scores zero.
    pub fn analyze(&self, words: &[Word]) -> PronunciationReport {
        if words.is_empty() {
            return PronunciationReport {
                pronunciation_score: 0,
                mispronounced_words: Vec::new(),
            };
        }

        let total: f64 = words.iter().map(|w| w.confidence).sum();
        let average = total / words.len() as f64;
        let score = (average * 100.0).round() as u32;

        let mispronounced_words = words
            .iter()
            .filter(|w| w.confidence < self.threshold)
            .map(|w| MispronouncedWord {
                word: w.text.clone(),
                start: w.start,
                confidence: w.confidence,
            })
            .collect();

        PronunciationReport {
            pronunciation_score: score,
            mispronounced_words,
        }
    }
}
