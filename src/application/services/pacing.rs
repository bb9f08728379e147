use crate::domain::{PacingReport, Word};

/// Computes speaking rate in words per minute and classifies it against
/// configurable slow/fast thresholds.
#[derive(Debug, Clone)]
pub struct PacingAnalyzer {
    slow_threshold: u32,
    fast_threshold: u32,
}

impl PacingAnalyzer {
    pub fn new(slow_threshold: u32, fast_threshold: u32) -> Self {
        Self {
            slow_threshold,
            fast_threshold,
        }
    }

    pub fn analyze(&self, words: &[Word], audio_duration_sec: f64) -> PacingReport {
        if words.is_empty() || audio_duration_sec <= 0.0 {
            return PacingReport {
                pacing_wpm: 0,
                pacing_feedback: "Unable to calculate pacing.".to_string(),
            };
        }

        let duration_minutes = audio_duration_sec / 60.0;
        let wpm = (words.len() as f64 / duration_minutes).round() as u32;

        let feedback = if wpm < self.slow_threshold {
            "Your speaking pace is too slow. Try to speak a bit faster."
        } else if wpm > self.fast_threshold {
            "Your speaking pace is too fast. Try to slow down a bit."
        } else {
            "Your speaking pace is appropriate."
        };

        PacingReport {
            pacing_wpm: wpm,
            pacing_feedback: feedback.to_string(),
        }
    }
}
