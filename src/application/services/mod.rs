mod evaluation_worker;
mod feedback_generator;
mod pacing;
mod pause_analysis;
mod pronunciation;

pub use evaluation_worker::{EvaluationError, EvaluationMessage, EvaluationWorker};
pub use feedback_generator::{FeedbackGenerator, FALLBACK_FEEDBACK};
pub use pacing::PacingAnalyzer;
pub use pause_analysis::PauseAnalyzer;
pub use pronunciation::PronunciationAnalyzer;
