use async_trait::async_trait;

/// Text-generation capability used to turn analysis numbers into
/// human-readable coaching feedback.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limit exceeded")]
    RateLimited,
    #[error("invalid response from llm: {0}")]
    InvalidResponse(String),
}
