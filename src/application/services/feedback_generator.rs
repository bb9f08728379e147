use std::fmt::Write;
use std::sync::Arc;

use crate::application::ports::LlmClient;
use crate::domain::{PacingReport, PauseReport, PronunciationReport};

/// Returned when the generative provider is unavailable; a feedback outage
/// must not fail an otherwise-successful evaluation.
pub const FALLBACK_FEEDBACK: &str =
    "Could not generate detailed feedback at this moment. Please try again later.";

/// Renders the computed metrics into a short coaching paragraph via the
/// generative-text provider.
#[derive(Clone)]
pub struct FeedbackGenerator {
    llm_client: Arc<dyn LlmClient>,
}

impl FeedbackGenerator {
    pub fn new(llm_client: Arc<dyn LlmClient>) -> Self {
        Self { llm_client }
    }

    pub async fn generate(
        &self,
        pronunciation: &PronunciationReport,
        pacing: &PacingReport,
        pauses: &PauseReport,
    ) -> String {
        let prompt = build_prompt(pronunciation, pacing, pauses);
        match self.llm_client.generate(&prompt).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Feedback generation failed, returning fallback");
                FALLBACK_FEEDBACK.to_string()
            }
        }
    }
}

fn build_prompt(
    pronunciation: &PronunciationReport,
    pacing: &PacingReport,
    pauses: &PauseReport,
) -> String {
    let mispronounced = if pronunciation.mispronounced_words.is_empty() {
        "None".to_string()
    } else {
        let mut listed = String::new();
        for (i, w) in pronunciation.mispronounced_words.iter().enumerate() {
            if i > 0 {
                listed.push_str(", ");
            }
            let _ = write!(listed, "{} (confidence {:.2})", w.word, w.confidence);
        }
        listed
    };

    format!(
        "Generate detailed, constructive, and encouraging feedback for a speaker based on \
the following analysis of their audio. Focus on improving their public speaking skills.\n\
\n\
Pronunciation analysis:\n\
- Overall pronunciation score: {score}/100\n\
- Mispronounced words: {mispronounced}\n\
\n\
Pacing analysis:\n\
- Words per minute (WPM): {wpm}\n\
- Pacing assessment: {pacing_assessment}\n\
\n\
Pause analysis:\n\
- Pause count: {pause_count}\n\
- Total pause duration: {total_pause:.2} seconds\n\
- Pause assessment: {pause_assessment}\n\
\n\
Instructions for the feedback:\n\
1. Start with a positive encouraging statement.\n\
2. Provide specific feedback on pronunciation, pacing, and pauses.\n\
3. For pronunciation, list specific words if mispronounced and suggest ways to improve.\n\
4. For pacing, comment on the WPM and suggest if they need to speed up or slow down.\n\
5. For pauses, suggest reducing long pauses or using them effectively.\n\
6. End with a concluding encouraging remark.\n\
7. Keep the feedback concise but informative, around 3-5 sentences.",
        score = pronunciation.pronunciation_score,
        mispronounced = mispronounced,
        wpm = pacing.pacing_wpm,
        pacing_assessment = pacing.pacing_feedback,
        pause_count = pauses.pause_count,
        total_pause = pauses.total_pause_time_sec,
        pause_assessment = pauses.pause_feedback,
    )
}
