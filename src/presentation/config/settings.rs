use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::presentation::config::Environment;

/// Process-wide configuration, read once at startup and handed to each
/// component by the composition root.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub transcription: TranscriptionSettings,
    pub feedback: FeedbackSettings,
    pub uploads: UploadSettings,
    pub analysis: AnalysisSettings,
    pub worker: WorkerSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub json_logs: bool,
}

#[derive(Debug, Clone)]
pub struct TranscriptionSettings {
    pub base_url: String,
    pub api_key: String,
    pub max_upload_attempts: u32,
    pub upload_backoff_base: Duration,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
}

#[derive(Debug, Clone)]
pub struct FeedbackSettings {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub dir: PathBuf,
    pub max_file_size_bytes: u64,
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub pronunciation_threshold: f64,
    pub slow_wpm_threshold: u32,
    pub fast_wpm_threshold: u32,
    pub pause_threshold_sec: f64,
}

#[derive(Debug, Clone)]
pub struct WorkerSettings {
    pub count: usize,
    pub queue_capacity: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let environment: Environment = parse_env("APP_ENV", Environment::Local)?;
        Ok(Self {
            server: ServerSettings {
                host: env_or("HOST", "0.0.0.0"),
                port: parse_env("PORT", 8000)?,
                json_logs: json_logs_from_env(environment),
                environment,
            },
            transcription: TranscriptionSettings {
                base_url: env_or("ASSEMBLYAI_BASE_URL", "https://api.assemblyai.com/v2"),
                api_key: required_env("ASSEMBLYAI_API_KEY")?,
                max_upload_attempts: parse_env("UPLOAD_MAX_ATTEMPTS", 3)?,
                upload_backoff_base: Duration::from_millis(parse_env(
                    "UPLOAD_BACKOFF_BASE_MS",
                    1_000,
                )?),
                poll_interval: Duration::from_millis(parse_env("POLL_INTERVAL_MS", 1_000)?),
                max_poll_attempts: parse_env("POLL_MAX_ATTEMPTS", 60)?,
            },
            feedback: FeedbackSettings {
                base_url: env_or("GEMINI_BASE_URL", "https://generativelanguage.googleapis.com"),
                api_key: required_env("GEMINI_API_KEY")?,
                model: env_or("GEMINI_MODEL", "gemini-2.0-flash-lite"),
            },
            uploads: UploadSettings {
                dir: PathBuf::from(env_or("UPLOAD_DIR", "uploads")),
                max_file_size_bytes: parse_env("MAX_FILE_SIZE_BYTES", 25 * 1024 * 1024)?,
                allowed_extensions: vec![".wav".to_string(), ".mp3".to_string()],
            },
            analysis: AnalysisSettings {
                pronunciation_threshold: parse_env("PRONUNCIATION_THRESHOLD", 0.85)?,
                slow_wpm_threshold: parse_env("SLOW_WPM_THRESHOLD", 90)?,
                fast_wpm_threshold: parse_env("FAST_WPM_THRESHOLD", 150)?,
                pause_threshold_sec: parse_env("PAUSE_THRESHOLD_SEC", 0.5)?,
            },
            worker: WorkerSettings {
                count: parse_positive_env("WORKER_COUNT", 1)?,
                queue_capacity: parse_positive_env("QUEUE_CAPACITY", 64)?,
            },
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {name}: {value}")]
    InvalidVar { name: &'static str, value: String },
}

fn required_env(name: &'static str) -> Result<String, SettingsError> {
    std::env::var(name).map_err(|_| SettingsError::MissingVar(name))
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: FromStr>(name: &'static str, default: T) -> Result<T, SettingsError> {
    match std::env::var(name) {
        Ok(value) => value
            .parse::<T>()
            .map_err(|_| SettingsError::InvalidVar { name, value }),
        Err(_) => Ok(default),
    }
}

/// Like `parse_env`, but for sizes that must be at least one. A zero queue
/// cannot accept work and a zero-sized pool would strand every accepted job,
/// so both are configuration errors rather than values to clamp.
fn parse_positive_env(name: &'static str, default: usize) -> Result<usize, SettingsError> {
    match std::env::var(name) {
        Ok(value) => match value.parse::<usize>() {
            Ok(parsed) if parsed > 0 => Ok(parsed),
            _ => Err(SettingsError::InvalidVar { name, value }),
        },
        Err(_) => Ok(default),
    }
}

fn json_logs_from_env(environment: Environment) -> bool {
    match std::env::var("LOG_FORMAT") {
        Ok(value) => value.to_lowercase() == "json",
        Err(_) => environment.default_json_logs(),
    }
}
