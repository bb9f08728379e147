use crate::domain::{PauseReport, Word};

/// Counts silent gaps between adjacent words that exceed a threshold.
#[derive(Debug, Clone)]
pub struct PauseAnalyzer {
    pause_threshold_sec: f64,
}

impl PauseAnalyzer {
    pub fn new(pause_threshold_sec: f64) -> Self {
        Self {
            pause_threshold_sec,
        }
    }

    pub fn analyze(&self, words: &[Word]) -> PauseReport {
        if words.len() < 2 {
            return PauseReport {
                pause_count: 0,
                total_pause_time_sec: 0.0,
                pause_feedback: "Insufficient data for pause analysis.".to_string(),
            };
        }

        let mut pause_count = 0usize;
        let mut total_pause = 0.0f64;
        for pair in words.windows(2) {
            // Providers may emit overlapping timings; a negative gap is no pause.
            let gap = (pair[1].start - pair[0].end).max(0.0);
            if gap > self.pause_threshold_sec {
                pause_count += 1;
                total_pause += gap;
            }
        }

        let feedback = match pause_count {
            0 => "Great! Your speech flows smoothly without long pauses.",
            1..=2 => "Good fluency with minimal pauses.",
            3..=4 => "Try to reduce long pauses to improve fluency.",
            _ => "Your speech has many long pauses. Practice speaking more continuously.",
        };

        PauseReport {
            pause_count,
            total_pause_time_sec: (total_pause * 100.0).round() / 100.0,
            pause_feedback: feedback.to_string(),
        }
    }
}
