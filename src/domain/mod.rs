mod artifact;
mod evaluation;
mod job;
mod job_id;
mod job_status;
mod storage_path;
mod transcript;
mod word;

pub use artifact::AudioArtifact;
pub use evaluation::{
    EvaluationReport, MispronouncedWord, PacingReport, PauseReport, PronunciationReport,
};
pub use job::{Job, JobError};
pub use job_id::JobId;
pub use job_status::JobStatus;
pub use storage_path::StoragePath;
pub use transcript::Transcript;
pub use word::Word;
