mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AnalysisSettings, FeedbackSettings, ServerSettings, Settings, SettingsError,
    TranscriptionSettings, UploadSettings, WorkerSettings,
};
